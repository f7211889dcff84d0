//! Noyau de la calculatrice infixe
//!
//! Organisation interne :
//! - piles.rs    : piles LIFO (opérandes, opérateurs/délimiteurs)
//! - jetons.rs   : jetons + source de jetons paresseuse (Lexeur)
//! - rpn.rs      : précédence, règle de dépilement, application des opérateurs
//! - eval.rs     : moteur une passe (shunting-yard + évaluation immédiate)
//! - erreurs.rs  : ExpressionInvalide (récupérable) vs erreurs fatales

pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod piles;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::{ErreurEvaluation, Raison};
pub use eval::{eval_expression, evaluer};
pub use jetons::{Jeton, Lexeur, SourceJetons};
