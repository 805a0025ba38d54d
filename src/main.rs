use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = onefc::cli::Cli::parse();
    onefc::logging::init(cli.verbose);

    if let Err(err) = onefc::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
