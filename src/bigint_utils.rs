use anyhow::{Context, Result, anyhow};
use num_bigint::{BigInt, Sign};

// Helpers to move secrets between text, raw bytes and BigInt

/// Parse a secret given as decimal (`12345`) or big-endian hex (`0x3039`).
/// A leading `-` is accepted in both forms.
pub fn parse_secret(text: &str) -> Result<BigInt> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        return Err(anyhow!("Empty secret"));
    }

    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex_digits) => {
            let bytes = decode_hex(hex_digits)
                .with_context(|| format!("Invalid hex secret '{}'", text))?;
            bytes_to_secret(&bytes)
        }
        None => {
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(anyhow!("Invalid decimal secret '{}'", text));
            }
            digits
                .parse::<BigInt>()
                .with_context(|| format!("Invalid decimal secret '{}'", text))?
        }
    };

    Ok(if negative { -magnitude } else { magnitude })
}

/// Interpret raw bytes as an unsigned big-endian integer.
pub fn bytes_to_secret(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

/// Render a secret as `0x`-prefixed big-endian hex, keeping the sign.
pub fn secret_to_hex(secret: &BigInt) -> String {
    let (sign, bytes) = secret.to_bytes_be();
    let prefix = if sign == Sign::Minus { "-0x" } else { "0x" };
    format!("{}{}", prefix, hex::encode(bytes))
}

fn decode_hex(digits: &str) -> Result<Vec<u8>> {
    if digits.is_empty() {
        return Err(anyhow!("no hex digits"));
    }
    // hex::decode wants an even number of nibbles
    if digits.len() % 2 == 1 {
        Ok(hex::decode(format!("0{}", digits))?)
    } else {
        Ok(hex::decode(digits)?)
    }
}

/// Serde adapter writing a big integer as a base-10 string, so JSON readers
/// never squeeze it into a fixed-width number.
pub mod decimal {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse::<T>().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_forms() {
        assert_eq!(parse_secret("12345").unwrap(), BigInt::from(12345));
        assert_eq!(parse_secret(" 0x3039 ").unwrap(), BigInt::from(12345));
        assert_eq!(parse_secret("0X3039").unwrap(), BigInt::from(12345));
        // odd nibble count
        assert_eq!(parse_secret("0xfff").unwrap(), BigInt::from(0xfff));
        assert_eq!(parse_secret("-42").unwrap(), BigInt::from(-42));
        assert_eq!(parse_secret("-0x2a").unwrap(), BigInt::from(-42));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_secret("").is_err());
        assert!(parse_secret("-").is_err());
        assert!(parse_secret("0x").is_err());
        assert!(parse_secret("0xzz").is_err());
        assert!(parse_secret("12a45").is_err());
        assert!(parse_secret("+5").is_err());
    }

    #[test]
    fn hex_rendering_keeps_sign() {
        assert_eq!(secret_to_hex(&BigInt::from(12345)), "0x3039");
        assert_eq!(secret_to_hex(&BigInt::from(-12345)), "-0x3039");
        assert_eq!(
            parse_secret(&secret_to_hex(&BigInt::from(-987654321))).unwrap(),
            BigInt::from(-987654321)
        );
    }

    #[test]
    fn large_values_survive_decimal_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "decimal")]
            value: BigInt,
        }

        let value: BigInt = "340282366920938463463374607431768211457".parse().unwrap();
        let json = serde_json::to_string(&Wrapper {
            value: value.clone(),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":"340282366920938463463374607431768211457"}"#);

        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, value);
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"1.5"}"#).is_err());
    }
}
