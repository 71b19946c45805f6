// Usage:
//   game-provider <client|server> --classpath <roots> [--definition <file>]
//                 [-Dkey=value ...] [-- <game args>]

use std::path::PathBuf;
use std::process::ExitCode;

use game_provider::core::config::{GameDefinition, SystemProperties};
use game_provider::core::loader::classpath::get_classpath_separator;
use game_provider::{EnvType, ProviderError, ProviderResult};

struct Cli {
    env: EnvType,
    roots: Vec<PathBuf>,
    definition: GameDefinition,
    properties: SystemProperties,
    game_args: Vec<String>,
}

fn parse_cli(raw: Vec<String>) -> ProviderResult<Cli> {
    let mut tokens = raw.into_iter();
    let env = tokens
        .next()
        .ok_or_else(|| ProviderError::Config("missing environment (client|server)".into()))?
        .parse::<EnvType>()?;

    let mut roots = Vec::new();
    let mut definition = GameDefinition::default();
    let mut defines = Vec::new();
    let mut game_args = Vec::new();

    while let Some(token) = tokens.next() {
        match token.as_str() {
            "--classpath" | "-cp" => {
                let value = tokens
                    .next()
                    .ok_or_else(|| ProviderError::Config("--classpath needs a value".into()))?;
                roots.extend(
                    value
                        .split(get_classpath_separator())
                        .filter(|root| !root.is_empty())
                        .map(PathBuf::from),
                );
            }
            "--definition" => {
                let path = tokens
                    .next()
                    .ok_or_else(|| ProviderError::Config("--definition needs a value".into()))?;
                definition = GameDefinition::load_from(&PathBuf::from(path))?;
            }
            "--" => {
                game_args.extend(tokens.by_ref());
            }
            define if define.starts_with("-D") => defines.push(define.to_string()),
            other => {
                return Err(ProviderError::Config(format!("unknown option '{other}'")));
            }
        }
    }

    let mut properties = SystemProperties::from_env();
    properties.extend_from_defines(&defines);

    Ok(Cli {
        env,
        roots,
        definition,
        properties,
        game_args,
    })
}

fn main() -> ExitCode {
    match parse_cli(std::env::args().skip(1).collect()) {
        Ok(cli) => game_provider::run(
            cli.definition,
            cli.properties,
            cli.env,
            &cli.game_args,
            cli.roots,
        ),
        Err(e) => {
            eprintln!("game-provider: {e}");
            ExitCode::from(64)
        }
    }
}
