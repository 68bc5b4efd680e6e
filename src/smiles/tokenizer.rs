use crate::element::Element;
use crate::smiles::error::SmilesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Bond(BondToken),
    RingClosure {
        bond: Option<BondToken>,
        digit: u16,
        pos: usize,
    },
    OpenParen(usize),
    CloseParen(usize),
    Dot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    pub element: Element,
    pub is_aromatic: bool,
    pub isotope: u16,
    pub hcount: Option<u8>,
    pub charge: i8,
    pub is_bracket: bool,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Aromatic,
    Up,
    Down,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, SmilesError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ' ' | '\t' | '\r' | '\n' => {
                i += 1;
            }
            '[' => {
                let (tok, next) = parse_bracket_atom(&chars, i)?;
                tokens.push(Token::Atom(tok));
                i = next;
            }
            'B' if chars.get(i + 1) == Some(&'r') => {
                tokens.push(Token::Atom(bare_atom(Element::BR, false, i)));
                i += 2;
            }
            'C' if chars.get(i + 1) == Some(&'l') => {
                tokens.push(Token::Atom(bare_atom(Element::CL, false, i)));
                i += 2;
            }
            c @ ('B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I') => {
                let element = organic_element(c.to_ascii_uppercase());
                tokens.push(Token::Atom(bare_atom(element, false, i)));
                i += 1;
            }
            c @ ('b' | 'c' | 'n' | 'o' | 'p' | 's') => {
                let element = organic_element(c.to_ascii_uppercase());
                tokens.push(Token::Atom(bare_atom(element, true, i)));
                i += 1;
            }
            '-' => {
                tokens.push(Token::Bond(BondToken::Single));
                i += 1;
            }
            '=' => {
                tokens.push(Token::Bond(BondToken::Double));
                i += 1;
            }
            '#' => {
                tokens.push(Token::Bond(BondToken::Triple));
                i += 1;
            }
            ':' => {
                tokens.push(Token::Bond(BondToken::Aromatic));
                i += 1;
            }
            '/' => {
                tokens.push(Token::Bond(BondToken::Up));
                i += 1;
            }
            '\\' => {
                tokens.push(Token::Bond(BondToken::Down));
                i += 1;
            }
            '(' => {
                tokens.push(Token::OpenParen(i));
                i += 1;
            }
            ')' => {
                tokens.push(Token::CloseParen(i));
                i += 1;
            }
            '.' => {
                tokens.push(Token::Dot(i));
                i += 1;
            }
            '%' => {
                let (digit, next) = parse_percent_ring(&chars, i)?;
                let pending_bond = try_consume_pending_bond(&mut tokens);
                tokens.push(Token::RingClosure {
                    bond: pending_bond,
                    digit,
                    pos: i,
                });
                i = next;
            }
            d @ '0'..='9' => {
                let pending_bond = try_consume_pending_bond(&mut tokens);
                tokens.push(Token::RingClosure {
                    bond: pending_bond,
                    digit: (d as u16) - b'0' as u16,
                    pos: i,
                });
                i += 1;
            }
            '*' => return Err(SmilesError::WildcardAtom { pos: i }),
            ch => return Err(SmilesError::UnexpectedChar { pos: i, ch }),
        }
    }

    Ok(tokens)
}

fn organic_element(upper: char) -> Element {
    match upper {
        'B' => Element::B,
        'C' => Element::C,
        'N' => Element::N,
        'O' => Element::O,
        'P' => Element::P,
        'S' => Element::S,
        'F' => Element::F,
        _ => Element::I,
    }
}

fn bare_atom(element: Element, aromatic: bool, pos: usize) -> AtomToken {
    AtomToken {
        element,
        is_aromatic: aromatic,
        isotope: 0,
        hcount: None,
        charge: 0,
        is_bracket: false,
        pos,
    }
}

fn try_consume_pending_bond(tokens: &mut Vec<Token>) -> Option<BondToken> {
    if let Some(Token::Bond(b)) = tokens.last().cloned() {
        tokens.pop();
        return Some(b);
    }
    None
}

fn parse_percent_ring(chars: &[char], start: usize) -> Result<(u16, usize), SmilesError> {
    let i = start + 1;
    match (chars.get(i), chars.get(i + 1)) {
        (Some(d1), Some(d2)) if d1.is_ascii_digit() && d2.is_ascii_digit() => {
            let digit = (*d1 as u16 - b'0' as u16) * 10 + (*d2 as u16 - b'0' as u16);
            Ok((digit, i + 2))
        }
        _ => Err(SmilesError::UnexpectedChar {
            pos: start,
            ch: '%',
        }),
    }
}

fn parse_bracket_atom(chars: &[char], start: usize) -> Result<(AtomToken, usize), SmilesError> {
    let mut i = start + 1; // skip '['

    let isotope = parse_number(chars, &mut i).unwrap_or(0);
    let (element, is_aromatic) = parse_bracket_element(chars, &mut i, start)?;
    skip_chirality(chars, &mut i);
    let hcount = parse_hcount(chars, &mut i);
    let charge = parse_charge(chars, &mut i, start)?;

    // Atom classes carry no chemistry; accept and drop them.
    if chars.get(i) == Some(&':') {
        i += 1;
        parse_number(chars, &mut i);
    }

    if chars.get(i) != Some(&']') {
        return Err(SmilesError::UnclosedBracket { pos: start });
    }
    i += 1; // skip ']'

    Ok((
        AtomToken {
            element,
            is_aromatic,
            isotope,
            hcount: Some(hcount.unwrap_or(0)),
            charge,
            is_bracket: true,
            pos: start,
        },
        i,
    ))
}

fn parse_number(chars: &[char], i: &mut usize) -> Option<u16> {
    let mut val: u16 = 0;
    let mut found = false;
    while let Some(c) = chars.get(*i).filter(|c| c.is_ascii_digit()) {
        found = true;
        val = val.saturating_mul(10).saturating_add(*c as u16 - b'0' as u16);
        *i += 1;
    }
    found.then_some(val)
}

fn parse_bracket_element(
    chars: &[char],
    i: &mut usize,
    bracket_start: usize,
) -> Result<(Element, bool), SmilesError> {
    if *i >= chars.len() {
        return Err(SmilesError::UnclosedBracket { pos: bracket_start });
    }
    if chars[*i] == '*' {
        return Err(SmilesError::WildcardAtom { pos: bracket_start });
    }

    let aromatic_map: &[(&str, Element)] = &[
        ("se", Element::SE),
        ("te", Element::TE),
        ("as", Element::AS),
        ("b", Element::B),
        ("c", Element::C),
        ("n", Element::N),
        ("o", Element::O),
        ("p", Element::P),
        ("s", Element::S),
    ];

    for &(pat, elem) in aromatic_map {
        let end = *i + pat.len();
        if end <= chars.len() && chars[*i..end].iter().copied().eq(pat.chars()) {
            *i = end;
            return Ok((elem, true));
        }
    }

    // Two-letter symbols win over their one-letter prefix.
    if *i + 1 < chars.len() && chars[*i].is_ascii_uppercase() && chars[*i + 1].is_ascii_lowercase()
    {
        let sym: String = chars[*i..=*i + 1].iter().collect();
        if let Some(e) = Element::from_symbol(&sym) {
            *i += 2;
            return Ok((e, false));
        }
    }

    if chars[*i].is_ascii_uppercase() {
        if let Some(e) = Element::from_symbol(&chars[*i].to_string()) {
            *i += 1;
            return Ok((e, false));
        }
    }

    Err(SmilesError::InvalidElement {
        pos: *i,
        text: chars[*i].to_string(),
    })
}

/// Stereo marks (`@`, `@@`, `@TH1`, `@SP2`, …) do not affect classification.
fn skip_chirality(chars: &[char], i: &mut usize) {
    if chars.get(*i) != Some(&'@') {
        return;
    }
    while chars.get(*i) == Some(&'@') {
        *i += 1;
    }
    for class in ["TH", "AL", "SP", "TB", "OH"] {
        let end = *i + 2;
        if end <= chars.len() && chars[*i..end].iter().copied().eq(class.chars()) {
            *i = end;
            parse_number(chars, i);
            return;
        }
    }
}

fn parse_hcount(chars: &[char], i: &mut usize) -> Option<u8> {
    if chars.get(*i) != Some(&'H') {
        return None;
    }
    *i += 1;
    match chars.get(*i).filter(|c| c.is_ascii_digit()) {
        Some(d) => {
            *i += 1;
            Some(*d as u8 - b'0')
        }
        None => Some(1),
    }
}

fn parse_charge(chars: &[char], i: &mut usize, bracket_start: usize) -> Result<i8, SmilesError> {
    let sign: i8 = match chars.get(*i) {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(0),
    };
    let symbol = chars[*i];
    *i += 1;

    if let Some(n) = parse_number(chars, i) {
        let n = i8::try_from(n).map_err(|_| SmilesError::InvalidCharge { pos: bracket_start })?;
        return Ok(sign * n);
    }

    let mut count: i8 = 1;
    while chars.get(*i) == Some(&symbol) {
        count = count
            .checked_add(1)
            .ok_or(SmilesError::InvalidCharge { pos: bracket_start })?;
        *i += 1;
    }
    Ok(sign * count)
}
