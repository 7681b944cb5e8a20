//! Hacker-jargon phrases for notes and CSV descriptions.
//!
//! A phrase is a template such as `"We need to {verb} the {adj} {abbr} {noun}"`
//! with each placeholder filled by a random pick from its word list.

use super::text::capitalize;
use rand::Rng;
use rand::seq::IndexedRandom;

const ABBREVIATIONS: &[&str] = &[
    "TCP", "HTTP", "SDD", "RAM", "GB", "CSS", "SSL", "AGP", "SQL", "FTP", "PCI", "AI", "ADP",
    "RSS", "XML", "EXE", "COM", "HDD", "THX", "SMTP", "SMS", "USB", "PNG", "XSS", "SFTP", "MITM",
];

const ADJECTIVES: &[&str] = &[
    "auxiliary",
    "primary",
    "back-end",
    "digital",
    "open-source",
    "virtual",
    "cross-platform",
    "redundant",
    "online",
    "haptic",
    "multi-byte",
    "bluetooth",
    "wireless",
    "1080p",
    "neural",
    "optical",
    "solid state",
    "mobile",
    "unicode",
    "backup",
    "high speed",
    "56k",
    "analog",
    "fiber optic",
    "central",
    "visual",
    "ethernet",
];

const NOUNS: &[&str] = &[
    "driver",
    "protocol",
    "bandwidth",
    "panel",
    "microchip",
    "program",
    "port",
    "card",
    "array",
    "interface",
    "system",
    "sensor",
    "firewall",
    "hard drive",
    "pixel",
    "alarm",
    "feed",
    "monitor",
    "application",
    "transmitter",
    "bus",
    "circuit",
    "capacitor",
    "matrix",
    "address",
    "form factor",
    "mainframe",
    "processor",
    "antenna",
    "transistor",
    "virus",
    "malware",
    "spyware",
    "network",
    "internet",
];

const VERBS: &[&str] = &[
    "back up",
    "bypass",
    "hack",
    "override",
    "compress",
    "copy",
    "navigate",
    "index",
    "connect",
    "generate",
    "quantify",
    "calculate",
    "synthesize",
    "input",
    "transmit",
    "program",
    "reboot",
    "parse",
    "shut down",
    "inject",
    "transcode",
    "encode",
    "attach",
    "disconnect",
    "network",
];

const ING_VERBS: &[&str] = &[
    "backing up",
    "bypassing",
    "hacking",
    "overriding",
    "compressing",
    "copying",
    "navigating",
    "indexing",
    "connecting",
    "generating",
    "quantifying",
    "calculating",
    "synthesizing",
    "transmitting",
    "programming",
    "parsing",
    "encoding",
    "transcoding",
];

const TEMPLATES: &[&str] = &[
    "If we {verb} the {noun}, we can get to the {abbr} {noun} through the {adj} {abbr} {noun}!",
    "We need to {verb} the {adj} {abbr} {noun}!",
    "Try to {verb} the {abbr} {noun}, maybe it will {verb} the {adj} {noun}!",
    "You can't {verb} the {noun} without {ing} the {adj} {abbr} {noun}!",
    "Use the {adj} {abbr} {noun}, then you can {verb} the {adj} {noun}!",
    "The {abbr} {noun} is down, {verb} the {adj} {noun} so we can {verb} the {abbr} {noun}!",
    "{ing} the {noun} won't do anything, we need to {verb} the {adj} {abbr} {noun}!",
    "I'll {verb} the {adj} {abbr} {noun}, that should {verb} the {abbr} {noun}!",
];

/// Produce one phrase, capitalised and ending in `!`.
pub fn hacker_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    let template = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
    capitalize(&expand(template, rng))
}

fn expand<R: Rng + ?Sized>(template: &str, rng: &mut R) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let token = &after[..close];
        match vocabulary(token) {
            Some(words) => out.push_str(words.choose(rng).copied().unwrap_or(token)),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

fn vocabulary(token: &str) -> Option<&'static [&'static str]> {
    match token {
        "abbr" => Some(ABBREVIATIONS),
        "adj" => Some(ADJECTIVES),
        "noun" => Some(NOUNS),
        "verb" => Some(VERBS),
        "ing" => Some(ING_VERBS),
        _ => None,
    }
}
