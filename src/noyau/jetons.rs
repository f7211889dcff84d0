// src/noyau/jetons.rs
//
// Jetons + source de jetons (lecture paresseuse, ligne par ligne).
//
// Le moteur ne connaît que le trait `SourceJetons` : il tire un jeton à la fois.
// `Lexeur` est l’implémentation fournie pour un flux texte (stdin, &[u8], ...).

use std::fmt;
use std::io::{self, BufRead};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    DiviseEntier, // '\'
    Modulo,
    Puissance, // ^
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Moins),
            '*' => Some(Self::Fois),
            '/' => Some(Self::Divise),
            '\\' => Some(Self::DiviseEntier),
            '%' => Some(Self::Modulo),
            '^' => Some(Self::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Moins => '-',
            Self::Fois => '*',
            Self::Divise => '/',
            Self::DiviseEntier => '\\',
            Self::Modulo => '%',
            Self::Puissance => '^',
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

/// Formes de délimiteurs : interchangeables, mais l’imbrication doit correspondre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiteur {
    Parenthese,
    Crochet,
}

impl Delimiteur {
    pub fn ouvrant(self) -> char {
        match self {
            Self::Parenthese => '(',
            Self::Crochet => '[',
        }
    }

    pub fn fermant(self) -> char {
        match self {
            Self::Parenthese => ')',
            Self::Crochet => ']',
        }
    }
}

impl fmt::Display for Delimiteur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parenthese => f.write_str("parenthesis"),
            Self::Crochet => f.write_str("bracket"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),
    Operateur(Operateur),
    Ouvrant(Delimiteur),
    Fermant(Delimiteur),
    FinExpression,
    // Mot ou caractère hors alphabet : le moteur le refuse.
    Inconnu(String),
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(v) => write!(f, "{v}"),
            Jeton::Operateur(op) => write!(f, "{op}"),
            Jeton::Ouvrant(d) => write!(f, "{}", d.ouvrant()),
            Jeton::Fermant(d) => write!(f, "{}", d.fermant()),
            Jeton::FinExpression => f.write_str("<fin>"),
            Jeton::Inconnu(s) => f.write_str(s),
        }
    }
}

/// Contrat consommé par le moteur : un jeton à la demande.
/// Une erreur d’E/S est fatale (le moteur la propage telle quelle).
pub trait SourceJetons {
    fn next_jeton(&mut self) -> io::Result<Jeton>;
}

/// Tokenizer paresseux sur un `BufRead`.
///
/// - lit une ligne seulement quand un jeton est demandé
/// - fin de ligne (`\n`, `\r\n`, `\r`) ou fin de flux => `FinExpression`
/// - nombres : chiffres avec au plus un '.', jamais de signe
/// - mots `[a-zA-Z_][a-zA-Z0-9_.]*` => `Inconnu`
pub struct Lexeur<R> {
    entree: R,
    ligne: Vec<char>,
    pos: usize,
    // true tant qu’une ligne lue n’a pas encore rendu sa FinExpression
    ligne_chargee: bool,
}

impl<R: BufRead> Lexeur<R> {
    pub fn new(entree: R) -> Self {
        Self {
            entree,
            ligne: Vec::new(),
            pos: 0,
            ligne_chargee: false,
        }
    }

    fn charger_ligne(&mut self) -> io::Result<()> {
        let mut buf = String::new();
        // read_line signale déjà l’UTF-8 invalide (InvalidData)
        self.entree.read_line(&mut buf)?;
        self.ligne = buf.chars().collect();
        self.pos = 0;
        self.ligne_chargee = true;
        Ok(())
    }

    /// Consomme la fin de ligne courante (`\n`, `\r\n`, `\r` ou fin de flux).
    /// Ce qui suit un `\r` isolé reste disponible pour l’expression suivante.
    fn fin_de_ligne(&mut self) -> Jeton {
        match self.ligne.get(self.pos) {
            Some('\r') => {
                self.pos += 1;
                if self.ligne.get(self.pos) == Some(&'\n') {
                    self.pos += 1;
                }
            }
            Some(_) => self.pos += 1,
            None => {}
        }

        if self.pos >= self.ligne.len() {
            self.ligne.clear();
            self.pos = 0;
            self.ligne_chargee = false;
        }
        Jeton::FinExpression
    }

    fn lire_nombre(&mut self) -> Jeton {
        let start = self.pos;
        let mut point_vu = false;
        while let Some(&c) = self.ligne.get(self.pos) {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !point_vu {
                point_vu = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let txt: String = self.ligne[start..self.pos].iter().collect();
        // "." seul ne contient aucun chiffre : parse échoue
        match txt.parse::<f64>() {
            Ok(v) => Jeton::Nombre(v),
            Err(_) => Jeton::Inconnu(txt),
        }
    }

    fn lire_mot(&mut self) -> Jeton {
        let start = self.pos;
        self.pos += 1;
        while let Some(&c) = self.ligne.get(self.pos) {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        Jeton::Inconnu(self.ligne[start..self.pos].iter().collect())
    }
}

impl<R: BufRead> SourceJetons for Lexeur<R> {
    fn next_jeton(&mut self) -> io::Result<Jeton> {
        if !self.ligne_chargee {
            self.charger_ligne()?;
        }

        // blancs (sauf fin de ligne)
        while let Some(&c) = self.ligne.get(self.pos) {
            if c.is_whitespace() && c != '\n' && c != '\r' {
                self.pos += 1;
            } else {
                break;
            }
        }

        let Some(&c) = self.ligne.get(self.pos) else {
            // fin de flux sans '\n' final
            return Ok(self.fin_de_ligne());
        };

        let jeton = match c {
            '\n' | '\r' => return Ok(self.fin_de_ligne()),
            '(' => Jeton::Ouvrant(Delimiteur::Parenthese),
            '[' => Jeton::Ouvrant(Delimiteur::Crochet),
            ')' => Jeton::Fermant(Delimiteur::Parenthese),
            ']' => Jeton::Fermant(Delimiteur::Crochet),
            c if c.is_ascii_digit() || c == '.' => return Ok(self.lire_nombre()),
            c if c.is_ascii_alphabetic() || c == '_' => return Ok(self.lire_mot()),
            c => match Operateur::depuis_char(c) {
                Some(op) => Jeton::Operateur(op),
                None => Jeton::Inconnu(c.to_string()),
            },
        };

        self.pos += 1;
        Ok(jeton)
    }
}
