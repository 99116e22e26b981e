//! Fuente con parsing estilo getopt.
//!
//! Opciones declaradas:
//! - `short_options`: cadena getopt (`a` flag, `a:` valor obligatorio,
//!   `a::` valor opcional),
//! - `long_options`: lista de nombres con los mismos sufijos.
//!
//! Los flags (y las opciones de valor opcional sin valor) se registran como
//! `false`; una opción repetida acumula sus valores en una lista. El parsing
//! termina en `--` o en el primer argumento que no es opción.
use indexmap::IndexMap;
use log::debug;
use serde_json::Value as Json;

use ctx_core::{ContextError, InputSource, Options, OptionsSchema, RequestData};

use super::ArgvInput;

pub const SHORT_OPTIONS: &str = "short_options";
pub const LONG_OPTIONS: &str = "long_options";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Flag,
    Required,
    Optional,
}

#[derive(Debug, Clone, Default)]
pub struct GetOptInput {
    argv: ArgvInput,
}

impl GetOptInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// argv fijo (incluye el nombre del programa en la posición 0).
    pub fn with_args<I, S>(args: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { argv: ArgvInput::with_args(args) }
    }
}

impl InputSource for GetOptInput {
    fn has_data(&self, options: &Options) -> bool {
        let short = options.string(SHORT_OPTIONS).ok().flatten().unwrap_or_default();
        let long = options.string_list(LONG_OPTIONS).unwrap_or_default();
        !short.is_empty() || !long.is_empty()
    }

    fn create_data(&self, options: &Options) -> Result<RequestData, ContextError> {
        let short = options.string(SHORT_OPTIONS)?.unwrap_or_default();
        let long = options.string_list(LONG_OPTIONS)?;
        let argv = self.argv.argv();
        let parsed = getopt(argv.get(1..).unwrap_or_default(), short, &long);
        debug!("getopt: {} option(s) parsed", parsed.len());
        Ok(RequestData::new(parsed))
    }

    fn declare_default_options(&self, schema: &mut OptionsSchema) {
        schema.set_default(SHORT_OPTIONS, "").set_default(LONG_OPTIONS, Json::Array(Vec::new()));
    }
}

fn short_specs(spec: &str) -> IndexMap<char, Arity> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = IndexMap::new();
    let mut i = 0;
    while i < chars.len() {
        let name = chars[i];
        let colons = chars[i + 1..].iter().take(2).take_while(|c| **c == ':').count();
        out.insert(name, arity(colons));
        i += 1 + colons;
    }
    out
}

fn long_spec(spec: &str) -> (String, Arity) {
    let name = spec.trim_end_matches(':');
    (name.to_string(), arity(spec.len() - name.len()))
}

fn arity(colons: usize) -> Arity {
    match colons {
        0 => Arity::Flag,
        1 => Arity::Required,
        _ => Arity::Optional,
    }
}

fn push(out: &mut IndexMap<String, Json>, name: String, value: Json) {
    match out.get_mut(&name) {
        Some(Json::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Json::Array(vec![first, value]);
        }
        None => {
            out.insert(name, value);
        }
    }
}

/// Parsea `args` (sin nombre de programa) según las especificaciones dadas.
pub fn getopt(args: &[String], short: &str, long: &[String]) -> IndexMap<String, Json> {
    let shorts = short_specs(short);
    let longs: IndexMap<String, Arity> = long.iter().map(|l| long_spec(l)).collect();
    let mut out = IndexMap::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        i += 1;
        if arg == "--" {
            break;
        }

        if let Some(body) = arg.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let Some(arity) = longs.get(name) else {
                debug!("getopt: unknown option --{name} ignored");
                continue;
            };
            let value = match (arity, inline) {
                (Arity::Flag, _) => Some(Json::Bool(false)),
                (_, Some(value)) => Some(Json::String(value.to_string())),
                (Arity::Required, None) => {
                    let next = args.get(i).cloned();
                    if next.is_some() {
                        i += 1;
                    }
                    next.map(Json::String)
                }
                (Arity::Optional, None) => Some(Json::Bool(false)),
            };
            if let Some(value) = value {
                push(&mut out, name.to_string(), value);
            }
            continue;
        }

        if let Some(body) = arg.strip_prefix('-').filter(|b| !b.is_empty()) {
            let chars: Vec<char> = body.chars().collect();
            let mut j = 0;
            while j < chars.len() {
                let c = chars[j];
                j += 1;
                let Some(arity) = shorts.get(&c) else {
                    debug!("getopt: unknown option -{c} ignored");
                    continue;
                };
                if *arity == Arity::Flag {
                    push(&mut out, c.to_string(), Json::Bool(false));
                    continue;
                }
                let rest: String = chars[j..].iter().collect();
                if !rest.is_empty() {
                    push(&mut out, c.to_string(), Json::String(rest));
                } else if *arity == Arity::Required {
                    if let Some(next) = args.get(i) {
                        i += 1;
                        push(&mut out, c.to_string(), Json::String(next.clone()));
                    }
                } else {
                    push(&mut out, c.to_string(), Json::Bool(false));
                }
                break;
            }
            continue;
        }

        break;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_specs_parse_suffixes() {
        let specs = short_specs("ab:c::");
        assert_eq!(specs.get(&'a'), Some(&Arity::Flag));
        assert_eq!(specs.get(&'b'), Some(&Arity::Required));
        assert_eq!(specs.get(&'c'), Some(&Arity::Optional));
    }

    #[test]
    fn long_options_with_values_and_flags() {
        let long = args(&["numbers:", "verbose", "mode::"]);
        let parsed = getopt(&args(&["--numbers", "1,2,3", "--verbose", "--mode=fast"]), "", &long);
        assert_eq!(parsed.get("numbers"), Some(&json!("1,2,3")));
        assert_eq!(parsed.get("verbose"), Some(&json!(false)));
        assert_eq!(parsed.get("mode"), Some(&json!("fast")));
    }

    #[test]
    fn short_options_grouped_and_attached() {
        let parsed = getopt(&args(&["-ab", "x", "-cvalue", "-c", "other"]), "ab:c:", &[]);
        assert_eq!(parsed.get("a"), Some(&json!(false)));
        assert_eq!(parsed.get("b"), Some(&json!("x")));
        assert_eq!(parsed.get("c"), Some(&json!(["value", "other"])));
    }

    #[test]
    fn parsing_stops_at_first_operand() {
        let parsed = getopt(&args(&["-a", "operand", "-b"]), "ab", &[]);
        assert!(parsed.contains_key("a"));
        assert!(!parsed.contains_key("b"));
    }
}
