//! Tabla periódica mínima: símbolo por número atómico.
//!
//! Sólo se necesita la identidad del elemento (para el fingerprint y para las
//! etiquetas de la depicción); no se calculan masas localmente porque las
//! propiedades las entrega el proveedor.

/// Comodín SMILES (`*`): átomo sin elemento, número atómico 0.
pub const WILDCARD: &str = "*";

/// Símbolos ordenados por número atómico (índice + 1), de H a Og.
static SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", //
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", //
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", //
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", //
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", //
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", //
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", //
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", //
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", //
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", //
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Número atómico a partir del símbolo exacto ("C", "Cl", "Fe").
pub fn atomic_number(symbol: &str) -> Option<u8> {
    if symbol == WILDCARD {
        return Some(0);
    }
    SYMBOLS.iter().position(|s| *s == symbol).map(|i| (i + 1) as u8)
}

/// Símbolo a partir del número atómico.
pub fn symbol(atomic_number: u8) -> Option<&'static str> {
    match atomic_number {
        0 => Some(WILDCARD),
        n => SYMBOLS.get(n as usize - 1).copied(),
    }
}

/// Valencia por defecto de los átomos del subconjunto orgánico de SMILES.
/// Para el resto devuelve `None` (no se infieren hidrógenos implícitos).
pub fn default_valence(atomic_number: u8) -> Option<u8> {
    match atomic_number {
        5 => Some(3),
        6 => Some(4),
        7 => Some(3),
        8 => Some(2),
        15 => Some(3),
        16 => Some(2),
        9 | 17 | 35 | 53 => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_roundtrip_for_common_elements() {
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("Cl"), Some(17));
        assert_eq!(atomic_number("Pt"), Some(78));
        assert_eq!(symbol(8), Some("O"));
        assert_eq!(symbol(35), Some("Br"));
        assert_eq!(atomic_number("U"), Some(92));
        assert_eq!(atomic_number("Og"), Some(118));
        assert_eq!(symbol(88), Some("Ra"));
    }

    #[test]
    fn unknown_symbols_and_numbers() {
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(atomic_number("c"), None);
        assert_eq!(symbol(119), None);
        assert_eq!(symbol(120), None);
    }

    #[test]
    fn wildcard_is_atomic_number_zero() {
        assert_eq!(atomic_number("*"), Some(0));
        assert_eq!(symbol(0), Some("*"));
        assert_eq!(default_valence(0), None);
    }

    #[test]
    fn default_valences() {
        assert_eq!(default_valence(6), Some(4));
        assert_eq!(default_valence(7), Some(3));
        assert_eq!(default_valence(26), None);
    }
}
