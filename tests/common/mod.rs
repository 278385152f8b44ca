#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use paycode::domain::tlv::TlvRecord;
use paycode::infrastructure::emv::append_crc;

pub const JOSE: &str = "application/jose";

pub fn tlv(tag: &str, value: &str) -> String {
    TlvRecord::new(tag, value).encode()
}

fn payload(initiation: &str, account: &str, amount: Option<&str>) -> String {
    let mut payload = format!(
        "{}{}{}{}{}",
        tlv("00", "01"),
        tlv("01", initiation),
        tlv("26", account),
        tlv("52", "0000"),
        tlv("53", "986"),
    );
    if let Some(amount) = amount {
        payload.push_str(&tlv("54", amount));
    }
    payload.push_str(&tlv("58", "BR"));
    payload.push_str(&tlv("59", "LOJA EXEMPLO"));
    payload.push_str(&tlv("60", "SAO PAULO"));
    payload.push_str(&tlv("62", &tlv("05", "***")));
    append_crc(&payload)
}

/// A static PIX code carrying its amount inline.
pub fn static_code(amount: &str) -> String {
    let account = format!(
        "{}{}",
        tlv("00", "br.gov.bcb.pix"),
        tlv("01", "fulano@example.com")
    );
    payload("11", &account, Some(amount))
}

/// A dynamic PIX code pointing at an amount document at `location`.
pub fn dynamic_code(location: &str) -> String {
    let account = format!("{}{}", tlv("00", "br.gov.bcb.pix"), tlv("25", location));
    payload("12", &account, None)
}

/// A compact token whose payload carries `claims`. The signature is junk.
pub fn jose_token(claims: &serde_json::Value) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"PS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        URL_SAFE_NO_PAD.encode("not-a-real-signature")
    )
}

/// A 47 digit boleto line code with the given fields and zero filler.
pub fn line_code(bank: &str, currency: &str, amount: &str) -> String {
    format!("{bank}{currency}{}{amount}", "0".repeat(33))
}
