use clap::Parser;
use modpack::config::{CliConfig, Command};
use modpack::domain::model::Symbol;
use modpack::utils::{logger, validation::Validate};
use modpack::{ModError, Registry, Scope, ScriptConfig, ScriptEngine, Value};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate().and_then(|_| run(&config)) {
        tracing::error!(
            "modpack failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> Result<(), ModError> {
    let registry = Registry::global();

    match &config.command {
        Command::Demo { name } => {
            let script = ScriptConfig::builtin(name.as_str())?;
            script.validate()?;
            ScriptEngine::new(script).run(registry, &mut std::io::stdout().lock())?;
        }
        Command::Call { path, args } => {
            let value = call(registry, path, args)?;
            println!("{}", value);
        }
        Command::List { id: None } => {
            for id in registry.ids() {
                let ns = registry.resolve(id)?;
                println!("{:<24} {:?}  {}", id, ns.kind(), ns.doc());
            }
        }
        Command::List { id: Some(id) } => {
            let ns = registry.resolve(id)?;
            if let Some(version) = ns.version() {
                println!("{} {}", ns.id(), version);
            }
            for (name, symbol) in ns.symbols() {
                match symbol {
                    Symbol::Function(f) => println!("  {}/{}  {}", name, f.arity, f.doc),
                    Symbol::Constant(v) => println!("  {} = {}", name, v.repr()),
                }
            }
        }
    }
    Ok(())
}

/// `import <module>` followed by `<module>.<name>(args...)`.
fn call(registry: &Registry, path: &str, args: &[String]) -> Result<Value, ModError> {
    let (module, _) = path
        .rsplit_once('.')
        .ok_or_else(|| ModError::name_not_found("<scope>", path))?;
    let mut scope = Scope::new(registry);
    scope.import(module)?;
    let args: Vec<Value> = args.iter().map(|a| Value::parse_arg(a)).collect();
    scope.call(path, &args)
}
