//! Command line front end: formats the content, encodes it and prints a
//! terminal preview of the symbol.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;

use qrcraft::content::{Content, WifiSecurity};
use qrcraft::{ECLevel, MaskPattern, QRBuilder, Version};

fn cli() -> Command {
    Command::new("qrcraft")
        .about("Encode text, links and other content into QR symbols")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("ec_level")
                .short('e')
                .long("ec-level")
                .help("Error correction level: L, M, Q or H")
                .value_name("LEVEL")
                .default_value("M")
                .global(true),
        )
        .arg(
            Arg::new("qr_version")
                .short('v')
                .long("version")
                .help("Force a symbol version from 1 to 40 (default: smallest that fits)")
                .value_name("VERSION")
                .global(true),
        )
        .arg(
            Arg::new("mask")
                .short('m')
                .long("mask")
                .help("Force a mask pattern from 0 to 7 (default: lowest penalty)")
                .value_name("MASK")
                .global(true),
        )
        .arg(
            Arg::new("module_size")
                .short('s')
                .long("module-size")
                .help("Characters per module side in the preview")
                .value_name("CHARS")
                .value_parser(clap::value_parser!(usize))
                .default_value("1")
                .global(true),
        )
        .subcommand(
            Command::new("text")
                .about("Plain text")
                .arg(Arg::new("text").required(true).index(1)),
        )
        .subcommand(
            Command::new("url").about("Website link").arg(Arg::new("url").required(true).index(1)),
        )
        .subcommand(
            Command::new("phone")
                .about("Phone number")
                .arg(Arg::new("number").required(true).index(1)),
        )
        .subcommand(
            Command::new("sms")
                .about("Text message")
                .arg(Arg::new("number").required(true).index(1))
                .arg(Arg::new("message").long("message").value_name("TEXT")),
        )
        .subcommand(
            Command::new("email")
                .about("E-mail address with optional subject and body")
                .arg(Arg::new("address").required(true).index(1))
                .arg(Arg::new("subject").long("subject").value_name("TEXT"))
                .arg(Arg::new("body").long("body").value_name("TEXT")),
        )
        .subcommand(
            Command::new("wifi")
                .about("Wi-Fi network credentials")
                .arg(Arg::new("ssid").required(true).index(1))
                .arg(Arg::new("password").long("password").value_name("PASSWORD").default_value(""))
                .arg(
                    Arg::new("security")
                        .long("security")
                        .value_parser(["WPA", "WEP", "nopass"])
                        .default_value("WPA"),
                )
                .arg(Arg::new("hidden").long("hidden").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("geo")
                .about("GPS location")
                .arg(Arg::new("latitude").required(true).index(1).allow_negative_numbers(true))
                .arg(Arg::new("longitude").required(true).index(2).allow_negative_numbers(true))
                .arg(Arg::new("name").long("name").value_name("TEXT")),
        )
}

fn string_arg(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required_arg(matches: &ArgMatches, id: &str) -> Result<String> {
    string_arg(matches, id).with_context(|| format!("Missing argument: {id}"))
}

fn content_from_matches(matches: &ArgMatches) -> Result<Content> {
    let content = match matches.subcommand() {
        Some(("text", m)) => Content::Text(required_arg(m, "text")?),
        Some(("url", m)) => Content::Url(required_arg(m, "url")?),
        Some(("phone", m)) => Content::Phone(required_arg(m, "number")?),
        Some(("sms", m)) => Content::Sms {
            phone: required_arg(m, "number")?,
            message: string_arg(m, "message"),
        },
        Some(("email", m)) => Content::Email {
            to: required_arg(m, "address")?,
            subject: string_arg(m, "subject"),
            body: string_arg(m, "body"),
        },
        Some(("wifi", m)) => Content::Wifi {
            ssid: required_arg(m, "ssid")?,
            password: required_arg(m, "password")?,
            security: match required_arg(m, "security")?.as_str() {
                "WEP" => WifiSecurity::Wep,
                "nopass" => WifiSecurity::NoPass,
                _ => WifiSecurity::Wpa,
            },
            hidden: m.get_flag("hidden"),
        },
        Some(("geo", m)) => Content::Location {
            latitude: required_arg(m, "latitude")?,
            longitude: required_arg(m, "longitude")?,
            name: string_arg(m, "name"),
        },
        Some((cmd, _)) => anyhow::bail!("Unknown command: {cmd}"),
        None => anyhow::bail!("No command specified"),
    };
    Ok(content)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = cli().get_matches();
    let content = content_from_matches(&matches)?.to_string();
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(&matches);

    let ec_level = required_arg(sub_matches, "ec_level")?
        .parse::<ECLevel>()
        .context("Failed to parse error correction level")?;
    let module_size = sub_matches.get_one::<usize>("module_size").copied().unwrap_or(1).max(1);

    let mut builder = QRBuilder::new(content.as_bytes());
    builder.ec_level(ec_level);
    if let Some(v) = string_arg(sub_matches, "qr_version") {
        builder.version(v.parse::<Version>().context("Failed to parse version")?);
    }
    if let Some(m) = string_arg(sub_matches, "mask") {
        builder.mask(m.parse::<MaskPattern>().context("Failed to parse mask pattern")?);
    }
    info!("Encoding {} bytes with {}", content.len(), builder.metadata());

    let symbol = builder.build().with_context(|| format!("Failed to encode {content:?}"))?;
    if symbol.is_empty() {
        println!("Nothing to encode");
        return Ok(());
    }

    println!(
        "Version: {}, Size: {}, Ec level: {:?}, Mask: {}, Penalty: {}",
        symbol.version(),
        symbol.size(),
        symbol.ec_level(),
        symbol.mask().map_or("-".to_string(), |m| m.to_string()),
        symbol.penalty()
    );
    print!("{}", symbol.to_str(module_size));

    Ok(())
}
