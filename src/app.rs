// src/app.rs
//
// Pilote (hors noyau) : invite, une ligne lue, évaluation, affichage.
//
// - ExpressionInvalide : message affiché, exécution normale
// - erreur fatale (E/S, division entière par zéro) : remontée à main

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::noyau::{evaluer, ErreurEvaluation, Lexeur};

pub const INVITE: &str = "Infix expression:";

#[derive(Debug, Error)]
pub enum ErreurApp {
    #[error(transparent)]
    Evaluation(#[from] ErreurEvaluation),

    #[error("cannot write result: {0}")]
    Sortie(#[from] io::Error),
}

/// Lit UNE expression sur `entree`, écrit le résultat (ou la raison du refus) sur `sortie`.
pub fn executer<R: BufRead, W: Write>(entree: R, sortie: &mut W) -> Result<(), ErreurApp> {
    writeln!(sortie, "{INVITE}")?;
    sortie.flush()?;

    let mut lexeur = Lexeur::new(entree);
    match evaluer(&mut lexeur) {
        Ok(v) => writeln!(sortie, "{v}")?,
        Err(ErreurEvaluation::ExpressionInvalide(raison)) => {
            log::warn!("expression refusée : {raison}");
            writeln!(sortie, "Invalid expression: {raison}")?;
        }
        Err(fatale) => return Err(fatale.into()),
    }
    Ok(())
}
