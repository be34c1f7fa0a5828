//! Parser SMILES -> `Molecule`.
//!
//! Cubre el subconjunto que aparece en las estructuras canónicas de ChEMBL:
//! subconjunto orgánico (alifático y aromático), átomos entre corchetes con
//! isótopo, quiralidad (ignorada), hidrógenos, carga y clase de átomo, enlaces
//! `- = # : / \`, ramas, cierres de anillo `0-9` y `%nn`, fragmentos `.` y
//! el comodín `*`. La estereoquímica se descarta: no afecta al fingerprint
//! circular usado. Al terminar se recalcula la aromaticidad (`aromatic`).

use std::collections::BTreeMap;

use thiserror::Error;

use crate::aromatic;
use crate::element;
use crate::molecule::{Atom, Bond, BondOrder, Molecule};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmilesError {
    #[error("notación vacía")]
    Empty,
    #[error("carácter inesperado '{ch}' en la posición {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },
    #[error("elemento desconocido '{0}'")]
    UnknownElement(String),
    #[error("paréntesis desbalanceado en la posición {0}")]
    UnbalancedParenthesis(usize),
    #[error("rama o cierre de anillo sin átomo previo en la posición {0}")]
    MissingPrecedingAtom(usize),
    #[error("enlace sin átomo que lo cierre en la posición {0}")]
    DanglingBond(usize),
    #[error("cierre de anillo {0} sin pareja")]
    UnmatchedRingClosure(u16),
    #[error("cierre de anillo {0} une un átomo consigo mismo")]
    SelfBond(u16),
    #[error("átomo entre corchetes sin terminar en la posición {0}")]
    UnterminatedBracket(usize),
    #[error("valor fuera de rango en la posición {0}")]
    OutOfRange(usize),
}

/// Parsea una notación SMILES. Los espacios al inicio y final se ignoran; una
/// notación vacía es un error (no una molécula vacía).
pub fn parse_smiles(input: &str) -> Result<Molecule, SmilesError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(SmilesError::Empty);
    }
    let mut parser = Parser::new(text);
    parser.run()?;
    parser.finish()
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    open_rings: BTreeMap<u16, (usize, Option<BondOrder>)>,
    branches: Vec<usize>,
    prev: Option<usize>,
    pending: Option<(BondOrder, usize)>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text,
               bytes: text.as_bytes(),
               pos: 0,
               atoms: Vec::new(),
               bonds: Vec::new(),
               open_rings: BTreeMap::new(),
               branches: Vec::new(),
               prev: None,
               pending: None }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn unexpected(&self, pos: usize) -> SmilesError {
        let ch = self.text[pos..].chars().next().unwrap_or('?');
        SmilesError::UnexpectedCharacter { ch, pos }
    }

    fn run(&mut self) -> Result<(), SmilesError> {
        while let Some(b) = self.peek() {
            let start = self.pos;
            match b {
                b'(' => {
                    self.bump();
                    let prev = self.prev.ok_or(SmilesError::MissingPrecedingAtom(start))?;
                    self.branches.push(prev);
                }
                b')' => {
                    self.bump();
                    if self.pending.is_some() {
                        return Err(SmilesError::DanglingBond(start));
                    }
                    let back = self.branches.pop().ok_or(SmilesError::UnbalancedParenthesis(start))?;
                    self.prev = Some(back);
                }
                b'-' | b'=' | b'#' | b':' | b'/' | b'\\' => {
                    self.bump();
                    if self.prev.is_none() || self.pending.is_some() {
                        return Err(SmilesError::DanglingBond(start));
                    }
                    let order = match b {
                        b'=' => BondOrder::Double,
                        b'#' => BondOrder::Triple,
                        b':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending = Some((order, start));
                }
                b'%' => {
                    self.bump();
                    let hi = self.bump().filter(u8::is_ascii_digit).ok_or_else(|| self.unexpected(start))?;
                    let lo = self.bump().filter(u8::is_ascii_digit).ok_or_else(|| self.unexpected(start))?;
                    let ring = (hi - b'0') as u16 * 10 + (lo - b'0') as u16;
                    self.ring_closure(ring, start)?;
                }
                b'0'..=b'9' => {
                    self.bump();
                    self.ring_closure((b - b'0') as u16, start)?;
                }
                b'[' => self.bracket_atom()?,
                b'.' => {
                    self.bump();
                    if self.pending.is_some() {
                        return Err(SmilesError::DanglingBond(start));
                    }
                    self.prev = None;
                }
                _ => self.organic_atom()?,
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<(), SmilesError> {
        let start = self.pos;
        let b = self.bump().ok_or_else(|| self.unexpected(start))?;
        let (symbol, aromatic) = match b {
            b'B' if self.peek() == Some(b'r') => {
                self.bump();
                ("Br", false)
            }
            b'C' if self.peek() == Some(b'l') => {
                self.bump();
                ("Cl", false)
            }
            b'B' => ("B", false),
            b'C' => ("C", false),
            b'N' => ("N", false),
            b'O' => ("O", false),
            b'P' => ("P", false),
            b'S' => ("S", false),
            b'F' => ("F", false),
            b'I' => ("I", false),
            b'*' => ("*", false),
            b'b' => ("B", true),
            b'c' => ("C", true),
            b'n' => ("N", true),
            b'o' => ("O", true),
            b'p' => ("P", true),
            b's' => ("S", true),
            _ => return Err(self.unexpected(start)),
        };
        let atomic_number = element::atomic_number(symbol).ok_or_else(|| SmilesError::UnknownElement(symbol.into()))?;
        self.push_atom(Atom { atomic_number, charge: 0, isotope: None, aromatic, hydrogens: 0, bracket: false });
        Ok(())
    }

    fn bracket_atom(&mut self) -> Result<(), SmilesError> {
        let start = self.pos;
        self.bump(); // '['
        let at = self.pos;
        let isotope = self.number().map(|n| u16::try_from(n).map_err(|_| SmilesError::OutOfRange(at))).transpose()?;

        let first = self.bump().ok_or(SmilesError::UnterminatedBracket(start))?;
        if first == b'*' {
            return self.bracket_tail(start, 0, false, isotope);
        }
        if !first.is_ascii_alphabetic() {
            return Err(self.unexpected(self.pos - 1));
        }
        let aromatic = first.is_ascii_lowercase();
        let mut symbol = String::from(first.to_ascii_uppercase() as char);
        if let Some(next) = self.peek().filter(u8::is_ascii_lowercase) {
            let candidate = format!("{}{}", symbol, next as char);
            if element::atomic_number(&candidate).is_some() {
                self.bump();
                symbol = candidate;
            }
        }
        let atomic_number = element::atomic_number(&symbol).ok_or(SmilesError::UnknownElement(symbol))?;
        self.bracket_tail(start, atomic_number, aromatic, isotope)
    }

    /// Resto de un átomo entre corchetes tras el símbolo: quiralidad,
    /// hidrógenos, carga y clase.
    fn bracket_tail(&mut self,
                    start: usize,
                    atomic_number: u8,
                    aromatic: bool,
                    isotope: Option<u16>)
                    -> Result<(), SmilesError> {
        while self.peek() == Some(b'@') {
            self.bump();
        }
        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.bump();
            let at = self.pos;
            hydrogens = match self.number() {
                Some(n) => u8::try_from(n).map_err(|_| SmilesError::OutOfRange(at))?,
                None => 1,
            };
        }

        let mut charge = 0i8;
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.bump();
            let unit: i8 = if sign == b'+' { 1 } else { -1 };
            charge = match self.number() {
                Some(n) => unit * n.min(15) as i8,
                None => {
                    let mut c = unit;
                    while self.peek() == Some(sign) {
                        self.bump();
                        c = c.saturating_add(unit);
                    }
                    c
                }
            };
        }

        // Clase de átomo ([CH3:1]); no forma parte de la estructura.
        if self.peek() == Some(b':') {
            self.bump();
            self.number();
        }

        if self.bump() != Some(b']') {
            return Err(SmilesError::UnterminatedBracket(start));
        }
        self.push_atom(Atom { atomic_number, charge, isotope, aromatic, hydrogens, bracket: true });
        Ok(())
    }

    fn number(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            self.bump();
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add((d - b'0') as u32));
        }
        value
    }

    fn default_order(&self, a: usize, b: usize) -> BondOrder {
        if self.atoms[a].aromatic && self.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn push_atom(&mut self, atom: Atom) {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        if let Some(prev) = self.prev {
            let order = match self.pending.take() {
                Some((order, _)) => order,
                None => self.default_order(prev, idx),
            };
            self.bonds.push(Bond { begin: prev, end: idx, order });
        }
        self.prev = Some(idx);
    }

    fn ring_closure(&mut self, ring: u16, pos: usize) -> Result<(), SmilesError> {
        let current = self.prev.ok_or(SmilesError::MissingPrecedingAtom(pos))?;
        let pending = self.pending.take().map(|(order, _)| order);
        match self.open_rings.remove(&ring) {
            Some((open, open_order)) => {
                if open == current {
                    return Err(SmilesError::SelfBond(ring));
                }
                let order = pending.or(open_order).unwrap_or_else(|| self.default_order(open, current));
                self.bonds.push(Bond { begin: open, end: current, order });
            }
            None => {
                self.open_rings.insert(ring, (current, pending));
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Molecule, SmilesError> {
        if let Some((_, pos)) = self.pending {
            return Err(SmilesError::DanglingBond(pos));
        }
        if let Some(ring) = self.open_rings.keys().next() {
            return Err(SmilesError::UnmatchedRingClosure(*ring));
        }
        if !self.branches.is_empty() {
            return Err(SmilesError::UnbalancedParenthesis(self.text.len()));
        }
        self.assign_implicit_hydrogens();
        Ok(aromatic::perceive(Molecule::new(self.atoms, self.bonds)))
    }

    /// Hidrógenos implícitos para átomos del subconjunto orgánico. Los átomos
    /// entre corchetes conservan el conteo declarado.
    fn assign_implicit_hydrogens(&mut self) {
        let mut degree = vec![0usize; self.atoms.len()];
        let mut valence_used = vec![0usize; self.atoms.len()];
        for bond in &self.bonds {
            let v = match bond.order {
                BondOrder::Single | BondOrder::Aromatic => 1,
                BondOrder::Double => 2,
                BondOrder::Triple => 3,
            };
            for end in [bond.begin, bond.end] {
                degree[end] += 1;
                valence_used[end] += v;
            }
        }
        for (idx, atom) in self.atoms.iter_mut().enumerate() {
            if atom.bracket {
                continue;
            }
            let Some(base) = element::default_valence(atom.atomic_number) else { continue };
            if atom.aromatic {
                // Un electrón del átomo aromático participa en el sistema pi.
                atom.hydrogens = (base as usize).saturating_sub(degree[idx] + 1) as u8;
                continue;
            }
            let used = valence_used[idx];
            let target = allowed_valences(atom.atomic_number, base).into_iter()
                                                                  .find(|v| *v as usize >= used)
                                                                  .unwrap_or(base);
            atom.hydrogens = (target as usize).saturating_sub(used) as u8;
        }
    }
}

fn allowed_valences(atomic_number: u8, base: u8) -> Vec<u8> {
    match atomic_number {
        7 | 15 => vec![3, 5],
        16 => vec![2, 4, 6],
        _ => vec![base],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrogens(mol: &Molecule) -> Vec<u8> {
        mol.atoms().iter().map(|a| a.hydrogens).collect()
    }

    #[test]
    fn parses_ethanol_with_implicit_hydrogens() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(hydrogens(&mol), vec![3, 2, 1]);
    }

    #[test]
    fn parses_benzene_ring_as_aromatic() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(mol.bond_count(), 6);
        assert!(mol.bonds().iter().all(|b| b.order == BondOrder::Aromatic));
        assert_eq!(hydrogens(&mol), vec![1; 6]);
    }

    #[test]
    fn parses_reference_compounds() {
        for smiles in ["CC(=O)Oc1ccccc1C(=O)O",
                       "CC(C)Cc1ccc(C(C)C(=O)O)cc1",
                       "CC(=O)Nc1ccc(O)cc1",
                       "Cn1c(=O)c2c(ncn2C)n(C)c1=O",
                       "CC(C)=O"]
        {
            assert!(parse_smiles(smiles).is_ok(), "{smiles}");
        }
    }

    #[test]
    fn caffeine_ring_atoms_have_no_extra_hydrogens() {
        let mol = parse_smiles("Cn1c(=O)c2c(ncn2C)n(C)c1=O").unwrap();
        assert_eq!(mol.atom_count(), 14);
        // c(=O): sin hidrógenos; el CH del imidazol conserva uno.
        let aromatic_h: u8 = mol.atoms().iter().filter(|a| a.aromatic).map(|a| a.hydrogens).sum();
        assert_eq!(aromatic_h, 1);
    }

    #[test]
    fn bracket_atoms_keep_declared_hydrogens_and_charge() {
        let mol = parse_smiles("[NH4+]").unwrap();
        assert_eq!(mol.atoms()[0].charge, 1);
        assert_eq!(mol.atoms()[0].hydrogens, 4);

        let mol = parse_smiles("[13CH3][O-]").unwrap();
        assert_eq!(mol.atoms()[0].isotope, Some(13));
        assert_eq!(mol.atoms()[1].charge, -1);
        assert_eq!(mol.atoms()[1].hydrogens, 0);

        let mol = parse_smiles("C[C@@H](N)C(=O)O").unwrap();
        assert_eq!(mol.atoms()[1].hydrogens, 1);
        assert_eq!(parse_smiles("[Fe++]").unwrap().atoms()[0].charge, 2);
    }

    #[test]
    fn two_letter_elements_and_fragments() {
        let mol = parse_smiles("[Na+].[Cl-]").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 0);
        let mol = parse_smiles("ClCBr").unwrap();
        assert_eq!(mol.atoms()[0].atomic_number, 17);
        assert_eq!(mol.atoms()[2].atomic_number, 35);
    }

    #[test]
    fn percent_ring_closures_and_explicit_bonds() {
        let mol = parse_smiles("C%12CCCCC%12").unwrap();
        assert_eq!(mol.bond_count(), 6);
        let mol = parse_smiles("C#N").unwrap();
        assert_eq!(mol.bonds()[0].order, BondOrder::Triple);
        assert_eq!(hydrogens(&mol), vec![1, 0]);
        let mol = parse_smiles("F/C=C/F").unwrap();
        assert_eq!(mol.bond_count(), 3);
    }

    #[test]
    fn hypervalent_sulfur_gets_higher_valence() {
        let mol = parse_smiles("CS(=O)(=O)C").unwrap();
        assert_eq!(mol.atoms()[1].hydrogens, 0);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_smiles("  CCO \n").unwrap().atom_count(), 3);
    }

    #[test]
    fn rejects_invalid_notation() {
        assert_eq!(parse_smiles("").unwrap_err(), SmilesError::Empty);
        assert_eq!(parse_smiles("   ").unwrap_err(), SmilesError::Empty);
        assert!(matches!(parse_smiles("C$C"), Err(SmilesError::UnexpectedCharacter { ch: '$', pos: 1 })));
        assert!(matches!(parse_smiles("hello"), Err(SmilesError::UnexpectedCharacter { .. })));
        assert!(matches!(parse_smiles("C1CC"), Err(SmilesError::UnmatchedRingClosure(1))));
        assert!(matches!(parse_smiles("C(C"), Err(SmilesError::UnbalancedParenthesis(_))));
        assert!(matches!(parse_smiles("CC)"), Err(SmilesError::UnbalancedParenthesis(2))));
        assert!(matches!(parse_smiles("CC="), Err(SmilesError::DanglingBond(2))));
        assert!(matches!(parse_smiles("=C"), Err(SmilesError::DanglingBond(0))));
        assert!(matches!(parse_smiles("(C)"), Err(SmilesError::MissingPrecedingAtom(0))));
        assert!(matches!(parse_smiles("[C"), Err(SmilesError::UnterminatedBracket(0))));
        assert!(matches!(parse_smiles("[Xx]"), Err(SmilesError::UnknownElement(_))));
        assert!(matches!(parse_smiles("C11"), Err(SmilesError::SelfBond(1))));
        assert!(matches!(parse_smiles("CCé"), Err(SmilesError::UnexpectedCharacter { ch: 'é', .. })));
        assert!(matches!(parse_smiles("[CH300]"), Err(SmilesError::OutOfRange(3))));
        assert!(matches!(parse_smiles("[70000C]"), Err(SmilesError::OutOfRange(1))));
    }

    #[test]
    fn wildcard_and_heavy_elements() {
        let mol = parse_smiles("*CC").unwrap();
        assert_eq!(mol.atoms()[0].atomic_number, 0);
        assert_eq!(mol.atoms()[0].hydrogens, 0);
        assert_eq!(mol.atoms()[1].hydrogens, 2);
        assert_eq!(parse_smiles("[*]O").unwrap().atoms()[0].atomic_number, 0);
        assert_eq!(parse_smiles("[U]").unwrap().atoms()[0].atomic_number, 92);
        assert_eq!(parse_smiles("[Gd+3]").unwrap().atoms()[0].charge, 3);
        assert_eq!(parse_smiles("[226Ra]").unwrap().atoms()[0].isotope, Some(226));
    }
}
