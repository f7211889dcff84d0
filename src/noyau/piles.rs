// src/noyau/piles.rs
//
// Piles LIFO du noyau :
// - pile des opérandes  : Pile<f64>
// - pile des opérateurs : Pile<Entree> (opérateurs + sentinelles de délimiteurs)
//
// Un simple Vec suffit ; on expose seulement push/pop/peek/is_empty,
// avec une erreur explicite quand la pile est vide.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErreurPile {
    #[error("stack underflow")]
    Vide,
}

#[derive(Clone, Debug)]
pub struct Pile<T> {
    items: Vec<T>,
}

impl<T> Default for Pile<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Pile<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, v: T) {
        self.items.push(v);
    }

    pub fn pop(&mut self) -> Result<T, ErreurPile> {
        self.items.pop().ok_or(ErreurPile::Vide)
    }

    /// Sommet sans dépiler.
    pub fn peek(&self) -> Result<&T, ErreurPile> {
        self.items.last().ok_or(ErreurPile::Vide)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
