//! Representación decimal canónica de `f64`.
//!
//! Los floats se hashean por su texto, no por sus bits: dígitos mínimos que
//! reproducen el valor exacto, notación fija para exponentes decimales en
//! [-4, 16), científica (`1e-05`, `1.5e+300`) fuera de ese rango, y sufijo
//! `.0` para valores enteros. Dos floats con el mismo texto colisionan; es una
//! imprecisión acotada y aceptada a cambio de reproducibilidad entre plataformas.

/// Texto canónico de `x`, compatible con los digests de float ya almacenados.
pub fn canonical_float_text(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` sin precisión produce los dígitos mínimos de round-trip: "-1.25e-7", "0e0".
    let sci = format!("{x:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    // posición del punto decimal relativa al primer dígito
    let decpt = exp + 1;
    if decpt > -4 && decpt <= 16 {
        push_fixed(&mut out, &digits, decpt);
    } else {
        push_scientific(&mut out, &digits, exp);
    }
    out
}

fn push_fixed(out: &mut String, digits: &str, decpt: i32) {
    let n = digits.len() as i32;
    if decpt <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-decpt) as usize));
        out.push_str(digits);
    } else if decpt >= n {
        out.push_str(digits);
        out.extend(std::iter::repeat('0').take((decpt - n) as usize));
        out.push_str(".0");
    } else {
        let (int_part, frac) = digits.split_at(decpt as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac);
    }
}

fn push_scientific(out: &mut String, digits: &str, exp: i32) {
    let (first, rest) = digits.split_at(1);
    out.push_str(first);
    if !rest.is_empty() {
        out.push('.');
        out.push_str(rest);
    }
    out.push('e');
    out.push(if exp < 0 { '-' } else { '+' });
    out.push_str(&format!("{:02}", exp.unsigned_abs()));
}
