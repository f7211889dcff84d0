// src/noyau/rpn.rs
//
// Shunting-yard (partie “règles”) :
// - précédence des opérateurs
// - règle de dépilement (<= : associativité à gauche pour tous, '^' compris)
// - application immédiate d’un opérateur sur la pile des opérandes
//
// Aucune forme postfixée n’est construite : chaque opérateur qui sortirait
// en RPN est appliqué tout de suite (voir eval.rs).
//
// Table (plus haut = lie plus fort) :
//   ^            3
//   * / \ %      2
//   + -          1
//   moins unaire 2  (après un opérateur : `2*-3`, `2^-2`)
//                3  si posé sur un '^' : `2^-3^2` reste `(2^-3)^2`
//   délimiteurs  0  (barrière : aucun opérateur réel n’a une précédence <= 0)

use num_traits::ToPrimitive;

use super::erreurs::{ErreurEvaluation, Raison};
use super::jetons::{Delimiteur, Operateur};
use super::piles::Pile;

/// Entrée de la pile des opérateurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entree {
    Op(Operateur),
    // '-' préfixe au milieu d’une expression ; s’applique à un seul opérande.
    // `sur_puissance` : posé au-dessus d’un '^' (directement ou via un autre Neg)
    Neg { sur_puissance: bool },
    Ouvrant(Delimiteur),
}

pub fn precedence(e: &Entree) -> i32 {
    match e {
        Entree::Op(Operateur::Puissance) => 3,
        Entree::Op(
            Operateur::Fois | Operateur::Divise | Operateur::DiviseEntier | Operateur::Modulo,
        ) => 2,
        Entree::Neg { sur_puissance: true } => 3,
        Entree::Neg { sur_puissance: false } => 2,
        Entree::Op(Operateur::Plus | Operateur::Moins) => 1,
        Entree::Ouvrant(_) => 0,
    }
}

/// Moins unaire à empiler au-dessus de `sommet`.
pub fn neg_sur(sommet: Option<&Entree>) -> Entree {
    let sur_puissance = matches!(
        sommet,
        Some(Entree::Op(Operateur::Puissance) | Entree::Neg { sur_puissance: true })
    );
    Entree::Neg { sur_puissance }
}

/// `2^3^2` donne `(2^3)^2` : l’égalité dépile aussi.
pub fn doit_depiler(entrant: Operateur, sommet: &Entree) -> bool {
    precedence(&Entree::Op(entrant)) <= precedence(sommet)
}

/// `second op first` (second = opérande gauche, empilé avant).
pub fn calculer(op: Operateur, second: f64, first: f64) -> Result<f64, ErreurEvaluation> {
    let v = match op {
        Operateur::Fois => second * first,
        // IEEE : x/0 donne ±inf ou NaN, pas d’erreur
        Operateur::Divise => second / first,
        Operateur::DiviseEntier => {
            if first == 0.0 {
                return Err(ErreurEvaluation::DivisionParZero);
            }
            let q = second / first;
            // to_i64 tronque vers zéro ; None si NaN, infini ou hors i64
            let n = q
                .to_i64()
                .ok_or(ErreurEvaluation::QuotientHorsLimites(q))?;
            n as f64
        }
        Operateur::Modulo => second % first,
        Operateur::Plus => second + first,
        Operateur::Moins => second - first,
        Operateur::Puissance => second.powf(first),
    };
    Ok(v)
}

/// Dépile deux opérandes, applique `op`, empile le résultat (net : -1).
pub fn appliquer(op: Operateur, operandes: &mut Pile<f64>) -> Result<(), ErreurEvaluation> {
    let first = operandes
        .pop()
        .map_err(|_| Raison::OperandesManquants)?;
    let second = operandes
        .pop()
        .map_err(|_| Raison::OperandesManquants)?;

    let v = calculer(op, second, first)?;
    log::debug!("{second} {op} {first} = {v}");
    operandes.push(v);
    Ok(())
}

/// Moins unaire : remplace le sommet par son opposé (net : 0).
pub fn negation(operandes: &mut Pile<f64>) -> Result<(), ErreurEvaluation> {
    let v = operandes
        .pop()
        .map_err(|_| Raison::OperandesManquants)?;
    log::debug!("-({v}) = {}", -v);
    operandes.push(-v);
    Ok(())
}
