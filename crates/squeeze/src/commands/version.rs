use squeeze_core::Config;

/// Version banner followed by the configuration `compress` would run with
pub fn run() -> anyhow::Result<()> {
    println!("{}", describe(&Config::from_env()));
    Ok(())
}

fn describe(config: &Config) -> String {
    let key = if config.api_key.is_some() {
        "set"
    } else {
        "not set"
    };
    format!(
        "squeeze {}\nengine: {}\ntarget model: {}\nendpoint: {}\napi key: {}\nbypass below: {} chars",
        env!("CARGO_PKG_VERSION"),
        config.engine,
        config.target_model,
        config.api_url,
        key,
        config.min_chars,
    )
}
