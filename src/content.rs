//! Typed payloads formatted into the strings QR scanners recognise.

use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum WifiSecurity {
    #[default]
    Wpa,
    Wep,
    NoPass,
}

impl Display for WifiSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::NoPass => "nopass",
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct VCard {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Event {
    pub title: String,
    pub location: Option<String>,
    /// ISO 8601 timestamp, e.g. `2024-05-01T10:00:00.000Z`
    pub start: String,
    pub end: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Content {
    Url(String),
    Text(String),
    Email { to: String, subject: Option<String>, body: Option<String> },
    Sms { phone: String, message: Option<String> },
    Phone(String),
    Wifi { ssid: String, password: String, security: WifiSecurity, hidden: bool },
    VCard(VCard),
    Event(Event),
    Location { latitude: String, longitude: String, name: Option<String> },
}

// Empty optional fields are treated as absent
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Text(text) => f.write_str(text),
            Self::Email { to, subject, body } => {
                write!(f, "mailto:{to}")?;
                let params = [("subject", non_empty(subject)), ("body", non_empty(body))]
                    .into_iter()
                    .filter_map(|(k, v)| v.map(|v| format!("{k}={}", percent_encode(v))))
                    .collect::<Vec<_>>();
                if !params.is_empty() {
                    write!(f, "?{}", params.join("&"))?;
                }
                Ok(())
            }
            Self::Sms { phone, message } => match non_empty(message) {
                Some(msg) => write!(f, "smsto:{phone}:{msg}"),
                None => write!(f, "tel:{phone}"),
            },
            Self::Phone(phone) => write!(f, "tel:{phone}"),
            Self::Wifi { ssid, password, security, hidden } => {
                write!(f, "WIFI:T:{security};S:{ssid};P:{password};H:{hidden};;")
            }
            Self::VCard(card) => fmt_vcard(f, card),
            Self::Event(event) => fmt_event(f, event),
            Self::Location { latitude, longitude, name } => {
                write!(f, "geo:{latitude},{longitude}")?;
                if let Some(name) = non_empty(name) {
                    write!(f, "?q={}", percent_encode(name))?;
                }
                Ok(())
            }
        }
    }
}

// vCard 3.0 with CRLF line endings
fn fmt_vcard(f: &mut fmt::Formatter<'_>, card: &VCard) -> fmt::Result {
    let VCard { first_name, last_name, .. } = card;
    let full_name = [first_name.as_str(), last_name.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("N:{last_name};{first_name};;;"),
        format!("FN:{full_name}"),
    ];
    let optional = [
        ("ORG", &card.organization),
        ("TITLE", &card.title),
        ("TEL;TYPE=CELL", &card.phone),
        ("EMAIL;TYPE=INTERNET", &card.email),
        ("URL", &card.url),
    ];
    lines.extend(optional.iter().filter_map(|(k, v)| non_empty(v).map(|v| format!("{k}:{v}"))));
    if let Some(addr) = non_empty(&card.address) {
        lines.push(format!("ADR:;;{addr};;;;"));
    }
    lines.push("END:VCARD".to_string());

    for line in lines {
        write!(f, "{line}\r\n")?;
    }
    Ok(())
}

fn fmt_event(f: &mut fmt::Formatter<'_>, event: &Event) -> fmt::Result {
    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("SUMMARY:{}", event.title),
        format!("DTSTART:{}", compact_date(&event.start)),
    ];
    if let Some(end) = non_empty(&event.end) {
        lines.push(format!("DTEND:{}", compact_date(end)));
    }
    if let Some(loc) = non_empty(&event.location) {
        lines.push(format!("LOCATION:{loc}"));
    }
    if let Some(desc) = non_empty(&event.description) {
        lines.push(format!("DESCRIPTION:{desc}"));
    }
    lines.push("END:VEVENT".to_string());

    write!(f, "BEGIN:VCALENDAR\nVERSION:2.0\n{}\nEND:VCALENDAR", lines.join("\n"))
}

// 2024-05-01T10:00:00.000Z -> 20240501T100000Z
fn compact_date(date: &str) -> String {
    date.replace(['-', ':'], "").replacen(".000", "", 1)
}

/// Percent-encodes everything except ASCII alphanumerics and `-_.!~*'()`
pub fn percent_encode(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => res.push(b as char),
            _ => res.push_str(&format!("%{b:02X}")),
        }
    }
    res
}
