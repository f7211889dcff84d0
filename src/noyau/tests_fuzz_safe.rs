//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le moteur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - soupe de jetons : jamais de panique, jamais d’erreur d’E/S
//! - expressions générées avec leur valeur : le moteur doit retrouver la même

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::erreurs::ErreurEvaluation;
use super::eval_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

const ALPHABET: &[char] = &[
    '0', '1', '2', '7', '9', '.', '+', '-', '*', '/', '\\', '%', '^', '(', ')', '[', ']', ' ',
    'x',
];

fn gen_soupe(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(24) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/// Expression entièrement parenthésée + sa valeur exacte (entiers, |v| < 2^53).
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, i64) {
    if depth == 0 || rng.pick(4) == 0 {
        let v = rng.pick(10) as i64;
        return (v.to_string(), v);
    }

    let (a, va) = gen_expr(rng, depth - 1);
    let (b, vb) = gen_expr(rng, depth - 1);
    let (o, f) = if rng.coin() { ('(', ')') } else { ('[', ']') };

    match rng.pick(4) {
        0 => (format!("{o}{a}+{b}{f}"), va + vb),
        1 => (format!("{o}{a}-{b}{f}"), va - vb),
        2 => (format!("{o}{a}*{b}{f}"), va * vb),
        // juxtaposition : a(b) == a*b
        _ => (format!("{o}{a}({b}){f}"), va * vb),
    }
}

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_soupe_de_jetons() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..2000 {
        budget(t0, max);

        let expr = gen_soupe(&mut rng);
        match eval_expression(&expr) {
            Ok(_) => seen_ok += 1,
            Err(ErreurEvaluation::Lecture(e)) => {
                panic!("erreur d’E/S inattendue: expr={expr:?} err={e}")
            }
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 0, "aucun succès: fuzz trop “sauvage”");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut r1 = Rng::new(0xBADC0DE_u64);
    let mut r2 = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        let e1 = gen_soupe(&mut r1);
        let e2 = gen_soupe(&mut r2);
        assert_eq!(e1, e2);

        // NaN != NaN : on compare le texte
        let s1 = format!("{:?}", eval_expression(&e1).map(f64::to_bits));
        let s2 = format!("{:?}", eval_expression(&e2).map(f64::to_bits));
        assert_eq!(s1, s2, "expr={e1:?}");
    }
}

#[test]
fn fuzz_safe_valeurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 4);
        let v = eval_expression(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert_eq!(v, attendu as f64, "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1", 800);
    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(v, 800.0);
}

#[test]
fn fuzz_safe_longue_chaine() {
    // chaîne à gauche : la pile des opérateurs reste à 1 élément
    let expr = vec!["1"; 10_000].join("+");
    assert_eq!(eval_expression(&expr).unwrap(), 10_000.0);

    // 1-(1-(1-...)) : profondeur maximale des piles, sans récursion
    let n = 2_000;
    let expr = format!("{}1{}", "1-(".repeat(n), ")".repeat(n));
    assert_eq!(eval_expression(&expr).unwrap(), 1.0);
}
