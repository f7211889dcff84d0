//! Noyau — évaluation en une seule passe
//!
//! jetons (tirés un par un) -> shunting-yard -> application immédiate
//!
//! Aucune RPN n’est matérialisée : dès qu’un opérateur serait écrit en
//! sortie postfixée, il est appliqué sur la pile des opérandes.
//!
//! Tout l’état (deux piles, deux drapeaux) naît et meurt dans un seul appel
//! à `evaluer` : rien ne fuit d’une expression à la suivante.

use super::erreurs::{ErreurEvaluation, Raison};
use super::jetons::{Delimiteur, Jeton, Lexeur, Operateur, SourceJetons};
use super::piles::Pile;
use super::rpn::{appliquer, doit_depiler, neg_sur, negation, Entree};

#[derive(Default)]
struct Evaluation {
    operandes: Pile<f64>,
    operateurs: Pile<Entree>,
    // “valeur” = un nombre ou une sous-expression fermée vient d’être lu
    prev_was_value: bool,
    ouverts: usize,
}

impl Evaluation {
    fn operande(&mut self, v: f64) -> Result<(), ErreurEvaluation> {
        if self.prev_was_value {
            return Err(Raison::DeuxOperandes.into());
        }
        self.operandes.push(v);
        self.prev_was_value = true;
        Ok(())
    }

    fn operateur(&mut self, op: Operateur) -> Result<(), ErreurEvaluation> {
        // moins en tête : "-5+3" => "0-5+3"
        if self.operandes.is_empty() && op == Operateur::Moins {
            log::debug!("moins unaire en tête : 0 empilé");
            self.operandes.push(0.0);
            self.prev_was_value = true;
        }
        if self.operandes.is_empty() {
            return Err(Raison::DebutOperateur.into());
        }
        if !self.prev_was_value {
            // "2+-3", "2*-3" : le '-' devient préfixe
            if op == Operateur::Moins {
                log::debug!("moins unaire après un opérateur");
                let neg = neg_sur(self.operateurs.peek().ok());
                self.operateurs.push(neg);
                return Ok(());
            }
            return Err(Raison::DeuxOperateurs.into());
        }
        self.prev_was_value = false;

        while let Ok(sommet) = self.operateurs.peek() {
            if !doit_depiler(op, sommet) {
                break;
            }
            self.depiler_et_appliquer()?;
        }
        self.operateurs.push(Entree::Op(op));
        Ok(())
    }

    fn ouvrant(&mut self, d: Delimiteur) {
        // multiplication implicite : "2(3+4)" => "2*(3+4)"
        if self.prev_was_value && !self.operandes.is_empty() {
            log::debug!("multiplication implicite avant {}", d.ouvrant());
            self.operateurs.push(Entree::Op(Operateur::Fois));
        }
        self.prev_was_value = false;
        self.operateurs.push(Entree::Ouvrant(d));
        self.ouverts += 1;
    }

    fn fermant(&mut self, d: Delimiteur) -> Result<(), ErreurEvaluation> {
        if self.ouverts == 0 {
            return Err(Raison::TropDeFermants.into());
        }
        // "(2+)", "2+(-)3" : un opérateur en attente n’a pas reçu son opérande
        self.verifier_operande_final()?;
        loop {
            let sommet = *self
                .operateurs
                .peek()
                .map_err(|_| Raison::PasAssezDOuvrants)?;

            match sommet {
                Entree::Ouvrant(o) if o == d => {
                    self.operateurs.pop().map_err(|_| Raison::PasAssezDOuvrants)?;
                    self.ouverts -= 1;
                    return Ok(());
                }
                Entree::Ouvrant(o) => {
                    return Err(Raison::Discordance {
                        ouvrant: o,
                        fermant: d,
                    }
                    .into());
                }
                Entree::Op(_) | Entree::Neg { .. } => self.depiler_et_appliquer()?,
            }
        }
    }

    fn terminer(mut self) -> Result<f64, ErreurEvaluation> {
        if self.ouverts != 0 {
            return Err(Raison::TropDOuvrants.into());
        }
        self.verifier_operande_final()?;
        while !self.operateurs.is_empty() {
            self.depiler_et_appliquer()?;
        }

        let resultat = self
            .operandes
            .pop()
            .map_err(|_| Raison::ExpressionVide)?;
        if !self.operandes.is_empty() {
            return Err(Raison::Malformee.into());
        }
        Ok(resultat)
    }

    /// Le sommet est un opérateur alors qu’aucune valeur ne l’a suivi.
    fn verifier_operande_final(&self) -> Result<(), ErreurEvaluation> {
        match self.operateurs.peek() {
            Ok(Entree::Op(_) | Entree::Neg { .. }) if !self.prev_was_value => {
                Err(Raison::OperandesManquants.into())
            }
            _ => Ok(()),
        }
    }

    fn depiler_et_appliquer(&mut self) -> Result<(), ErreurEvaluation> {
        match self.operateurs.pop().map_err(|_| Raison::Malformee)? {
            Entree::Op(op) => appliquer(op, &mut self.operandes),
            Entree::Neg { .. } => negation(&mut self.operandes),
            // les délimiteurs sont retirés par `fermant`, jamais appliqués
            Entree::Ouvrant(_) => Err(Raison::TropDOuvrants.into()),
        }
    }
}

/// API publique : évalue UNE expression tirée de `source`.
///
/// Consomme les jetons jusqu’à la fin d’expression incluse. À la première
/// erreur, plus aucun jeton n’est tiré (le reste de la ligne reste dans la source).
pub fn evaluer<S: SourceJetons + ?Sized>(source: &mut S) -> Result<f64, ErreurEvaluation> {
    let mut ev = Evaluation::default();

    loop {
        let jeton = source.next_jeton()?;
        log::trace!("jeton : {jeton}");

        match jeton {
            Jeton::Nombre(v) => ev.operande(v)?,
            Jeton::Operateur(op) => ev.operateur(op)?,
            Jeton::Ouvrant(d) => ev.ouvrant(d),
            Jeton::Fermant(d) => ev.fermant(d)?,
            Jeton::Inconnu(s) => return Err(Raison::SymboleInconnu(s).into()),
            Jeton::FinExpression => {
                let v = ev.terminer()?;
                log::debug!("résultat : {v}");
                return Ok(v);
            }
        }
    }
}

/// Raccourci : évalue la première ligne de `s`.
pub fn eval_expression(s: &str) -> Result<f64, ErreurEvaluation> {
    evaluer(&mut Lexeur::new(s.as_bytes()))
}
