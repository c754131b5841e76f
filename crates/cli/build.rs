use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("novex")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Novex Contributors")
        .about("Export serialized fiction pages to TXT, HTML or JSON")
        .arg(clap::arg!(<INPUT> "URL to fetch, saved HTML file, or '-' for stdin"))
        .arg(clap::arg!(--url <URL> "Page location for file or stdin input"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Export format (txt, html, json)")
                .default_value("txt")
                .value_parser(["txt", "html", "json"]),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: <title>.<ext> in --dir)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--dir <DIR> "Directory for the generated file name")
                .default_value(".")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--stdout "Write the export to stdout instead of a file"))
        .arg(clap::arg!(--no_bom "Omit the UTF-8 byte order mark from TXT output"))
        .arg(clap::arg!(--lang <LANG> "Value of the lang attribute in HTML output").default_value("en"))
        .arg(clap::arg!(--pretty "Pretty print JSON output"))
        .arg(
            clap::arg!(--site_config <FILE> "Site config file used instead of per-domain lookup")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--config_dir <DIR> "Directory searched for <domain>.txt site configs")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--structure_threshold <NUM> "Paragraph-like element count above which paragraphs are harvested"))
        .arg(clap::arg!(--min_paragraph_chars <NUM> "Paragraphs with this many characters or fewer are dropped"))
        .arg(
            clap::arg!(--strategy <STRATEGY> "Reconstruction strategy")
                .value_parser(["auto", "structured", "text"]),
        )
        .arg(clap::arg!(--force "Export pages the site config does not list as supported"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "novex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "novex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "novex", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "novex", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
