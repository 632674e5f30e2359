//! Recursive-descent Newick parser producing `Tree`s

use crate::graph::{Clade, Tree};
use thiserror::Error;

/// Characters ending an unquoted label or branch length
const TOKEN_DELIMITERS: &[char] = &['(', ')', '[', ']', ':', ';', ','];

/// Errors raised while parsing Newick text
#[derive(Debug, Error, PartialEq)]
pub enum NewickError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Unexpected character '{found}' at position {position}")]
    Unexpected { found: char, position: usize },

    #[error("Invalid branch length '{value}' at position {position}")]
    InvalidLength { value: String, position: usize },

    #[error("Unterminated quoted label starting at position {0}")]
    UnterminatedQuote(usize),

    #[error("Unterminated comment starting at position {0}")]
    UnterminatedComment(usize),

    #[error("No tree found in input")]
    Empty,
}

/// Parse every `;`-terminated tree in `input`
///
/// Comments in square brackets are skipped. Unquoted labels are kept
/// verbatim (underscores are not turned into spaces).
pub fn parse_newick(input: &str) -> Result<Vec<Tree>, NewickError> {
    let mut parser = NewickParser::new(input);
    let mut trees = Vec::new();
    loop {
        parser.skip_ignorable()?;
        if parser.peek().is_none() {
            break;
        }
        trees.push(parser.parse_tree()?);
    }
    if trees.is_empty() {
        return Err(NewickError::Empty);
    }
    Ok(trees)
}

struct NewickParser {
    chars: Vec<char>,
    pos: usize,
}

impl NewickParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Skip whitespace and `[...]` comments
    fn skip_ignorable(&mut self) -> Result<(), NewickError> {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.pos += 1;
            } else if ch == '[' {
                let start = self.pos;
                while self.peek().is_some_and(|c| c != ']') {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(NewickError::UnterminatedComment(start));
                }
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn expect(&mut self, expected: char) -> Result<(), NewickError> {
        self.skip_ignorable()?;
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(NewickError::Unexpected { found, position: self.pos }),
            None => Err(NewickError::UnexpectedEnd),
        }
    }

    fn parse_tree(&mut self) -> Result<Tree, NewickError> {
        let root = self.parse_clade()?;
        self.expect(';')?;
        Ok(Tree::new(root))
    }

    fn parse_clade(&mut self) -> Result<Clade, NewickError> {
        self.skip_ignorable()?;
        let mut clade = Clade::default();

        if self.peek() == Some('(') {
            self.pos += 1;
            loop {
                clade.children.push(self.parse_clade()?);
                self.skip_ignorable()?;
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some(')') => {
                        self.pos += 1;
                        break;
                    }
                    Some(found) => return Err(NewickError::Unexpected { found, position: self.pos }),
                    None => return Err(NewickError::UnexpectedEnd),
                }
            }
        }

        clade.name = self.parse_label()?;

        self.skip_ignorable()?;
        if self.peek() == Some(':') {
            self.pos += 1;
            clade.branch_length = Some(self.parse_length()?);
        }
        Ok(clade)
    }

    fn parse_label(&mut self) -> Result<Option<String>, NewickError> {
        self.skip_ignorable()?;
        match self.peek() {
            Some('\'') => self.parse_quoted().map(Some),
            Some(_) => {
                let token = self.take_token();
                Ok((!token.is_empty()).then_some(token))
            }
            None => Ok(None),
        }
    }

    fn parse_quoted(&mut self) -> Result<String, NewickError> {
        let start = self.pos;
        self.pos += 1;
        let mut label = String::new();
        loop {
            match self.peek() {
                Some('\'') if self.chars.get(self.pos + 1) == Some(&'\'') => {
                    label.push('\'');
                    self.pos += 2;
                }
                Some('\'') => {
                    self.pos += 1;
                    return Ok(label);
                }
                Some(ch) => {
                    label.push(ch);
                    self.pos += 1;
                }
                None => return Err(NewickError::UnterminatedQuote(start)),
            }
        }
    }

    fn parse_length(&mut self) -> Result<f64, NewickError> {
        self.skip_ignorable()?;
        let position = self.pos;
        let token = self.take_token();
        token
            .parse::<f64>()
            .map_err(|_| NewickError::InvalidLength { value: token, position })
    }

    /// Unquoted run up to the next delimiter, trimmed
    fn take_token(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| !TOKEN_DELIMITERS.contains(&c)) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect::<String>().trim().to_string()
    }
}
