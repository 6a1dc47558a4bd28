// Terminal front end for the translator widget
fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("translator_widget_lib=info"),
    )
    .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(translator_widget_lib::run()) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
