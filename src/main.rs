// src/main.rs
//
// Calculatrice infixe — point d’entrée console
// --------------------------------------------
// - une ligne lue sur stdin, résultat sur stdout
// - journalisation : RUST_LOG=debug montre la démarche (opérations appliquées)
// - code de sortie 1 sur erreur fatale (E/S, division entière par zéro)

use std::io;
use std::process::ExitCode;

use calculatrice_infixe::app;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    match app::executer(stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
