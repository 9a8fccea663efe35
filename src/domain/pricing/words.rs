//! Spanish words for receipt amounts.
//!
//! `121.50` renders as `"ciento veintiuno pesos con cincuenta centavos"`.
//! Standalone units keep the masculine `uno`; before `mil`/`millones` they
//! shorten to `un` (`"veintiún mil"`). Exactly one peso or one centavo uses
//! the singular noun. Whole millions take `de` (`"un millón de pesos"`).

use crate::domain::foundation::Money;

const UNITS: [&str; 30] = [
    "cero",
    "uno",
    "dos",
    "tres",
    "cuatro",
    "cinco",
    "seis",
    "siete",
    "ocho",
    "nueve",
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
    "veinte",
    "veintiuno",
    "veintidós",
    "veintitrés",
    "veinticuatro",
    "veinticinco",
    "veintiséis",
    "veintisiete",
    "veintiocho",
    "veintinueve",
];

const TENS: [&str; 10] = [
    "", "", "veinte", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

/// Renders an amount as `"<pesos> pesos[ con <centavos> centavos]"`.
pub fn amount_in_words(amount: Money) -> String {
    let pesos = amount.pesos() as u64;
    let centavos = amount.centavos() as u64;

    let mut text = match pesos {
        1 => "un peso".to_string(),
        n if n >= 1_000_000 && n % 1_000_000 == 0 => {
            format!("{} de pesos", number_in_words(n))
        }
        n => format!("{} pesos", number_in_words(n)),
    };
    match centavos {
        0 => {}
        1 => text.push_str(" con un centavo"),
        n => {
            text.push_str(" con ");
            text.push_str(&number_in_words(n));
            text.push_str(" centavos");
        }
    }
    text
}

/// Cardinal number in Spanish words, for values below one trillion.
pub fn number_in_words(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    let millions = n / 1_000_000;
    let thousands = (n % 1_000_000) / 1_000;
    let rest = n % 1_000;

    let mut parts: Vec<String> = Vec::new();
    match millions {
        0 => {}
        1 => parts.push("un millón".to_string()),
        m => parts.push(format!("{} millones", apocopate(&number_in_words(m)))),
    }
    match thousands {
        0 => {}
        1 => parts.push("mil".to_string()),
        t => parts.push(format!("{} mil", apocopate(&below_thousand(t)))),
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }
    parts.join(" ")
}

fn below_thousand(n: u64) -> String {
    if n == 100 {
        return "cien".to_string();
    }
    let hundreds = (n / 100) as usize;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, r) => below_hundred(r),
        (h, 0) => HUNDREDS[h].to_string(),
        (h, r) => format!("{} {}", HUNDREDS[h], below_hundred(r)),
    }
}

fn below_hundred(n: u64) -> String {
    let n = n as usize;
    if n < UNITS.len() {
        return UNITS[n].to_string();
    }
    match n % 10 {
        0 => TENS[n / 10].to_string(),
        u => format!("{} y {}", TENS[n / 10], UNITS[u]),
    }
}

/// Shortens a trailing "uno" before a masculine noun.
fn apocopate(words: &str) -> String {
    if let Some(stem) = words.strip_suffix("veintiuno") {
        format!("{}veintiún", stem)
    } else if let Some(stem) = words.strip_suffix("uno") {
        format!("{}un", stem)
    } else {
        words.to_string()
    }
}
