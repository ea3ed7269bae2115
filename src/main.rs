use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tarot_bot::config::{BotConfig, Command, LogFormat};
use tarot_bot::core::commands::{CommandTable, COMMANDS};
use tarot_bot::core::presentation;
use tarot_bot::core::ConfigProvider;
use tarot_bot::domain::model::CommandContext;
use tarot_bot::utils::error::{ErrorSeverity, TarotError};
use tarot_bot::utils::{logger, validation::Validate};
use tarot_bot::{Catalogue, CliConfig, DiscordClient, TarotBot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match config.log_format() {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match cli.command() {
        Command::Preview { name } => preview(&config, &name),
        Command::Check => {
            if let Err(e) = config.validate() {
                fail(&e);
            }
            display_config_summary(&config);
        }
        Command::Run => run(config).await,
    }

    Ok(())
}

async fn run(config: BotConfig) {
    tracing::info!("🚀 Starting tarot-bot");

    // token 不存在時直接結束，不建立任何連線
    let credentials = match config.prepare() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("❌ Startup check failed: {}", e);
            fail(&e);
        }
    };

    let client = match DiscordClient::new(
        &config.discord.api_base,
        credentials.token(),
        config.request_timeout(),
    ) {
        Ok(client) => client,
        Err(e) => fail(&e),
    };

    let catalogue = Arc::new(Catalogue::build());
    tracing::info!("🃏 Catalogue ready with {} cards", catalogue.len());

    let mut bot = TarotBot::new(client, config, catalogue);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("⚠️ Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    if let Err(e) = bot.run(shutdown).await {
        tracing::error!(
            "❌ Bot stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        fail(&e);
    }

    tracing::info!("✅ tarot-bot stopped cleanly");
}

fn preview(config: &BotConfig, name: &str) {
    let catalogue = Catalogue::build();
    let table = CommandTable::new();
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let ctx = CommandContext {
        channel_id: "preview",
        author_name: "preview",
        prefix: config.prefix(),
    };
    let messages = table.respond(name, &ctx, &catalogue, &mut rng);
    println!("{}", presentation::to_plain_text(&messages));
}

fn display_config_summary(config: &BotConfig) {
    println!("📋 Configuration Summary:");
    println!("  API: {}", config.discord.api_base);
    println!("  Channels: {}", config.channel_ids().join(", "));
    println!("  Poll interval: {:?}", config.poll_interval());
    println!("  Request timeout: {:?}", config.request_timeout());
    println!("  Prefix: {}", config.prefix());
    match config.seed() {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: (random)"),
    }

    let token_status = match config.credentials() {
        Ok(_) => "set",
        Err(_) => "MISSING",
    };
    println!("  Token ({}): {}", config.discord.token_env, token_status);

    println!();
    println!("🔮 Commands:");
    for spec in COMMANDS.iter() {
        println!("  {}{:<12} {}", config.prefix(), spec.name, spec.help);
    }
    println!();
}

fn fail(e: &TarotError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
