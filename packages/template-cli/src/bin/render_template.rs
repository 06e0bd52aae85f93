/**
 * Attribute Template CLI - render-template
 *
 * Renders one or more HTML templates against a JSON data file
 */
use anyhow::Result;
use attr_template::Renderer;
use attr_template_cli::{init_logging, load_data, load_options, render_file, render_to_dir};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process;

fn main() {
    init_logging();

    if let Err(error) = run() {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = Command::new("render-template")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render HTML templates driven by if / if-not / value / each attributes")
        .arg(
            Arg::new("templates")
                .value_name("TEMPLATE")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Template files to render"),
        )
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON file with the data context (default: {})"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON file with render options"),
        )
        .arg(
            Arg::new("remove-attributes")
                .short('r')
                .long("remove-attributes")
                .action(ArgAction::SetTrue)
                .help("Strip directive attributes and delete hidden elements"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("PREFIX")
                .help("Directive attribute prefix, e.g. js-"),
        )
        .arg(
            Arg::new("hidden-class")
                .long("hidden-class")
                .value_name("CLASS")
                .help("Class used to mark hidden elements"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write rendered files here instead of stdout"),
        )
        .get_matches();

    let mut options = load_options(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if matches.get_flag("remove-attributes") {
        options.remove_js_attributes = true;
    }
    if let Some(prefix) = matches.get_one::<String>("prefix") {
        options.attribute_prefix = prefix.clone();
    }
    if let Some(class) = matches.get_one::<String>("hidden-class") {
        options.hidden_class = class.clone();
    }

    let data = load_data(matches.get_one::<PathBuf>("data").map(PathBuf::as_path))?;
    let templates: Vec<PathBuf> = matches
        .get_many::<PathBuf>("templates")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let renderer = Renderer::new(options);

    match matches.get_one::<PathBuf>("out-dir") {
        Some(out_dir) => {
            render_to_dir(&renderer, &templates, &data, out_dir)?;
        }
        None => {
            for template in &templates {
                print!("{}", render_file(&renderer, template, &data)?);
            }
        }
    }
    Ok(())
}
