// src/noyau/erreurs.rs
//
// Deux niveaux d’erreurs :
// - ExpressionInvalide : entrée mal formée, rapportée à l’appelant (récupérable)
// - DivisionParZero / QuotientHorsLimites / Lecture : fatales (arithmétique ou E/S)

use std::io;

use thiserror::Error;

use super::jetons::Delimiteur;

/// Raison d’une expression invalide (message lisible).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Raison {
    #[error("two operands in a row")]
    DeuxOperandes,

    #[error("cannot begin with an operator")]
    DebutOperateur,

    #[error("two operators in a row")]
    DeuxOperateurs,

    #[error("too many closing delimiters")]
    TropDeFermants,

    #[error("not enough opening delimiters")]
    PasAssezDOuvrants,

    #[error("mismatched delimiters: cannot close {ouvrant} with {fermant}")]
    Discordance {
        ouvrant: Delimiteur,
        fermant: Delimiteur,
    },

    #[error("too many opening delimiters")]
    TropDOuvrants,

    #[error("missing operand")]
    OperandesManquants,

    #[error("empty expression")]
    ExpressionVide,

    #[error("malformed expression")]
    Malformee,

    #[error("unrecognized symbol: {0}")]
    SymboleInconnu(String),
}

#[derive(Debug, Error)]
pub enum ErreurEvaluation {
    #[error("invalid expression: {0}")]
    ExpressionInvalide(#[from] Raison),

    #[error("integer division by zero")]
    DivisionParZero,

    #[error("integer quotient out of range: {0}")]
    QuotientHorsLimites(f64),

    #[error("cannot read expression: {0}")]
    Lecture(#[from] io::Error),
}

impl ErreurEvaluation {
    /// Vrai pour les erreurs qui ne relèvent pas d’une expression mal formée.
    pub fn est_fatale(&self) -> bool {
        !matches!(self, Self::ExpressionInvalide(_))
    }

    pub fn raison(&self) -> Option<&Raison> {
        match self {
            Self::ExpressionInvalide(r) => Some(r),
            _ => None,
        }
    }
}
