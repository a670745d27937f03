use anyhow::Context;
use clap::Parser;
use modpack::domain::model::ErrorPolicy;
use modpack::utils::{logger, validation::Validate};
use modpack::{ModError, Registry, ScriptConfig, ScriptEngine};

#[derive(Parser)]
#[command(name = "toml-script")]
#[command(about = "Run a consumer script described in a TOML manifest")]
struct Args {
    /// Path to the TOML script manifest
    #[arg(short, long, default_value = "script.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,

    /// Keep going after a failing step and report it
    #[arg(long)]
    keep_going: bool,

    /// Validate and show the plan without resolving anything
    #[arg(long)]
    dry_run: bool,
}

fn load(args: &Args) -> anyhow::Result<ScriptConfig> {
    let mut config = ScriptConfig::from_file(&args.config)
        .with_context(|| format!("failed to load script manifest '{}'", args.config))?;
    if args.keep_going {
        config.set_error_policy(ErrorPolicy::Report);
        tracing::info!("Error policy overridden to: report");
    }
    config
        .validate()
        .with_context(|| format!("script manifest '{}' is invalid", args.config))?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Loading script from: {}", args.config);

    let config = match load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            let code = match e.downcast_ref::<ModError>() {
                Some(inner) => {
                    eprintln!("💡 {}", inner.recovery_suggestion());
                    inner.exit_code()
                }
                None => 1,
            };
            std::process::exit(code);
        }
    };

    let engine = ScriptEngine::new(config);

    if args.dry_run {
        println!("Script: {}", engine.source().script.name);
        if let Some(description) = engine.source().description() {
            println!("  {}", description);
        }
        for line in engine.plan() {
            println!("  {}", line);
        }
        return;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match engine.run(Registry::global(), &mut out) {
        // reported failures do not fail the run
        Ok(report) if report.failures > 0 => {
            eprintln!(
                "⚠️ {} of {} step(s) failed (run {})",
                report.failures, report.steps_run, report.run_id
            );
        }
        Ok(report) => {
            tracing::info!("Script completed: {} step(s)", report.steps_run);
        }
        Err(e) => {
            tracing::error!(
                "Script failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
