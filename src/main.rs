use brand_presence::domain::ports::ConfigProvider;
use brand_presence::utils::{logger, validation::Validate};
use brand_presence::{CliConfig, DashboardEngine, Formatter, LocalStorage, LogFormat};
use clap::Parser;

fn main() {
    let args = CliConfig::parse();

    // 初始化日誌
    match args.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("Starting brand-presence");
    tracing::debug!("CLI args: {:?}", args);

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let formatter = Formatter::new(config.output_format());
    let engine = DashboardEngine::new(LocalStorage::default(), config);

    match engine.run().and_then(|report| formatter.format_report(&report)) {
        Ok(output) => println!("{}", output),
        Err(e) => fail(&e),
    }
}

fn fail(e: &brand_presence::DashboardError) -> ! {
    tracing::error!(
        category = ?e.category(),
        severity = ?e.severity(),
        "❌ {}",
        e
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
