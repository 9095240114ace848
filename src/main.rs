use json_classgen::cli::CommandLineInterface;

fn main() -> anyhow::Result<()> {
    let command_line_interface = CommandLineInterface::load();
    init_tracing(command_line_interface.verbose);
    command_line_interface.run()
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
