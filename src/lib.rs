//! Calculatrice infixe : évaluation en une passe (shunting-yard fusionné).

pub mod app;
pub mod noyau;
