use std::process::ExitCode;

use ctxflow_rust::calculator;
use ctxflow_rust::config::init_dotenv;

const USAGE: &str = "uso: ctxflow <add|square|statistics|days> [argumentos...]";

fn main() -> ExitCode {
    // Cargar variables de entorno desde .env si existe
    init_dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((method, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match calculator::run(method, rest) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string()));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
