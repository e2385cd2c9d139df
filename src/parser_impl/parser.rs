//! Parser for fully-contracted term strings
//!
//! Grammar (whitespace separated):
//!
//! ```text
//! term    := coeff {perm} {factor}
//! coeff   := signed decimal (sign may be a separate token)
//! perm    := "P(" idx "," idx ")"
//! factor  := name "(" idx {"," idx} ")"  |  "<" idx "," idx "||" idx "," idx ">"
//! ```
//!
//! Antisymmetrized two-electron integrals parse into the factor name `g`;
//! everything else keeps its spelled name.

use std::fmt;

use color_eyre::eyre::{bail, eyre, Result};

/// Orbital index space of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpace {
    Occupied,
    Virtual,
}

impl IndexSpace {
    /// Slice label used in emitted einsum operands.
    pub fn slice_label(&self) -> char {
        match self {
            IndexSpace::Occupied => 'o',
            IndexSpace::Virtual => 'v',
        }
    }
}

/// Classify an orbital label. Occupied labels are `i j k l m n`, virtual
/// labels are `a b c d e f`.
pub fn index_space(label: char) -> Result<IndexSpace> {
    match label {
        'i' | 'j' | 'k' | 'l' | 'm' | 'n' => Ok(IndexSpace::Occupied),
        'a' | 'b' | 'c' | 'd' | 'e' | 'f' => Ok(IndexSpace::Virtual),
        other => bail!("unknown orbital label '{}'", other),
    }
}

/// One elementary tensor factor of a contracted term.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorFactor {
    pub name: String,
    pub indices: Vec<char>,
}

impl TensorFactor {
    pub fn new(name: impl Into<String>, indices: Vec<char>) -> Self {
        TensorFactor {
            name: name.into(),
            indices,
        }
    }

    fn is_integral(&self) -> bool {
        self.name == "g" && self.indices.len() == 4
    }
}

impl fmt::Display for TensorFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            write!(
                f,
                "<{},{}||{},{}>",
                self.indices[0], self.indices[1], self.indices[2], self.indices[3]
            )
        } else {
            let list: Vec<String> = self.indices.iter().map(|c| c.to_string()).collect();
            write!(f, "{}({})", self.name, list.join(","))
        }
    }
}

/// One fully-contracted term: coefficient, antisymmetrizing permutation
/// operators over external indices, and tensor factors.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorTerm {
    pub coefficient: f64,
    pub permutations: Vec<(char, char)>,
    pub factors: Vec<TensorFactor>,
}

impl TensorTerm {
    /// Parse an engine-formatted contracted string.
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace();

        let first = tokens
            .next()
            .ok_or_else(|| eyre!("empty contracted term"))?;
        // Some engines print the sign as its own token.
        let coefficient_text = if first == "+" || first == "-" {
            let magnitude = tokens
                .next()
                .ok_or_else(|| eyre!("dangling sign in term '{}'", input))?;
            format!("{}{}", first, magnitude)
        } else {
            first.to_string()
        };
        let coefficient: f64 = coefficient_text
            .parse()
            .map_err(|_| eyre!("bad coefficient '{}' in term '{}'", coefficient_text, input))?;

        let mut permutations = Vec::new();
        let mut factors = Vec::new();
        for token in tokens {
            if let Some(body) = token.strip_prefix("P(") {
                let body = body
                    .strip_suffix(')')
                    .ok_or_else(|| eyre!("unterminated permutation '{}' in '{}'", token, input))?;
                let pair = parse_index_list(body, input)?;
                if pair.len() != 2 {
                    bail!("permutation '{}' must carry two labels in '{}'", token, input);
                }
                if !factors.is_empty() {
                    bail!(
                        "permutation '{}' after tensor factors in '{}'",
                        token,
                        input
                    );
                }
                permutations.push((pair[0], pair[1]));
            } else if let Some(body) = token.strip_prefix('<') {
                let body = body
                    .strip_suffix('>')
                    .ok_or_else(|| eyre!("unterminated integral '{}' in '{}'", token, input))?;
                let (bra, ket) = body
                    .split_once("||")
                    .ok_or_else(|| eyre!("integral '{}' lacks '||' in '{}'", token, input))?;
                let mut indices = parse_index_list(bra, input)?;
                indices.extend(parse_index_list(ket, input)?);
                if indices.len() != 4 {
                    bail!("integral '{}' must carry four labels in '{}'", token, input);
                }
                factors.push(TensorFactor::new("g", indices));
            } else {
                let open = token
                    .find('(')
                    .ok_or_else(|| eyre!("unrecognized token '{}' in '{}'", token, input))?;
                let name = &token[..open];
                let body = token[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| eyre!("unterminated factor '{}' in '{}'", token, input))?;
                if name.is_empty() {
                    bail!("factor '{}' lacks a name in '{}'", token, input);
                }
                let indices = parse_index_list(body, input)?;
                factors.push(TensorFactor::new(name, indices));
            }
        }

        if factors.is_empty() {
            bail!("term '{}' carries no tensor factors", input);
        }

        Ok(TensorTerm {
            coefficient,
            permutations,
            factors,
        })
    }

    /// Check index balance against the declared output indices: every label
    /// appears either exactly once among the factors and in the output set
    /// (external) or exactly twice among the factors (contracted).
    pub fn validate(&self, output: &[char]) -> Result<()> {
        let mut counts: Vec<(char, usize)> = Vec::new();
        for factor in &self.factors {
            for &index in &factor.indices {
                index_space(index)?;
                match counts.iter_mut().find(|(c, _)| *c == index) {
                    Some(entry) => entry.1 += 1,
                    None => counts.push((index, 1)),
                }
            }
        }

        for &(index, count) in &counts {
            let external = output.contains(&index);
            match (external, count) {
                (true, 1) | (false, 2) => {}
                (true, n) => bail!(
                    "external index '{}' appears {} times in '{}'",
                    index,
                    n,
                    self
                ),
                (false, n) => bail!(
                    "contracted index '{}' appears {} times in '{}'",
                    index,
                    n,
                    self
                ),
            }
        }

        for &(x, y) in &self.permutations {
            for label in [x, y] {
                if !output.contains(&label) {
                    bail!(
                        "permutation label '{}' is not an output index of '{}'",
                        label,
                        self
                    );
                }
            }
        }
        Ok(())
    }
}

fn parse_index_list(body: &str, term: &str) -> Result<Vec<char>> {
    body.split(',')
        .map(|piece| {
            let piece = piece.trim();
            let mut chars = piece.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Ok(c),
                _ => Err(eyre!("bad orbital label '{}' in '{}'", piece, term)),
            }
        })
        .collect()
}

impl fmt::Display for TensorTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.14}", self.coefficient)?;
        for &(x, y) in &self.permutations {
            write!(f, " P({},{})", x, y)?;
        }
        for factor in &self.factors {
            write!(f, " {}", factor)?;
        }
        Ok(())
    }
}
