use crate::error::ParseError;

/// Primitive-type keywords of the template grammar.
///
/// Only the integer, float and string families are handled when composing a
/// template's parsing procedure; the rest are recognized by the lexer so
/// that they fail cleanly at declaration time instead of lexing as names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Word,
    Dword,
    Sword,
    Sdword,
    Char,
    Uchar,
    Void,
    Lpstr,
    Unicode,
    Cstring,
    /// The `STRING` keyword — named apart from `Cstring` on purpose.
    NString,
    Float,
    Double,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (starts with letter/underscore, continues with
    /// alphanumerics, underscore or hyphen)
    Name(String),
    /// Quoted string literal (content without quotes)
    Str(String),
    /// Integer literal, optionally signed
    Int(i64),
    /// Float literal, optionally signed, optional fraction and exponent
    Float(f64),
    /// UUID literal `<hex...-hex...>` (angle brackets stripped, content kept
    /// verbatim and not validated)
    Uuid(String),
    /// A primitive-type keyword
    Prim(Primitive),
    // Keywords
    Template,
    Array,
    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,
    // End of input
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
}

fn keyword(word: &str) -> Option<Token> {
    let tok = match word {
        "template" => Token::Template,
        "array" => Token::Array,
        "WORD" => Token::Prim(Primitive::Word),
        "DWORD" => Token::Prim(Primitive::Dword),
        "SWORD" => Token::Prim(Primitive::Sword),
        "SDWORD" => Token::Prim(Primitive::Sdword),
        "CHAR" => Token::Prim(Primitive::Char),
        "UCHAR" => Token::Prim(Primitive::Uchar),
        "VOID" => Token::Prim(Primitive::Void),
        "LPSTR" => Token::Prim(Primitive::Lpstr),
        "UNICODE" => Token::Prim(Primitive::Unicode),
        "CSTRING" => Token::Prim(Primitive::Cstring),
        "STRING" => Token::Prim(Primitive::NString),
        "FLOAT" => Token::Prim(Primitive::Float),
        "DOUBLE" => Token::Prim(Primitive::Double),
        _ => return None,
    };
    Some(tok)
}

pub fn lex(src: &str, filename: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        // Line comments: both `//` and `#`
        if c == '#' || (c == '/' && pos + 1 < chars.len() && chars[pos + 1] == '/') {
            while pos < chars.len() && chars[pos] != '\n' {
                pos += 1;
            }
            continue;
        }

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
            }
            pos += 1;
            continue;
        }

        let tok_line = line;

        // String literal
        if c == '"' {
            pos += 1;
            let start = pos;
            loop {
                if pos >= chars.len() || chars[pos] == '\n' {
                    return Err(ParseError::syntax(
                        filename,
                        tok_line,
                        "unterminated string literal",
                    ));
                }
                if chars[pos] == '"' {
                    break;
                }
                pos += 1;
            }
            let s: String = chars[start..pos].iter().collect();
            pos += 1; // closing quote
            tokens.push(Spanned {
                token: Token::Str(s),
                line: tok_line,
            });
            continue;
        }

        // UUID literal
        if c == '<' {
            pos += 1;
            let start = pos;
            loop {
                if pos >= chars.len() {
                    return Err(ParseError::syntax(
                        filename,
                        tok_line,
                        "unterminated UUID literal",
                    ));
                }
                let uc = chars[pos];
                if uc == '>' {
                    break;
                }
                if !uc.is_ascii_hexdigit() && uc != '-' {
                    return Err(ParseError::syntax(
                        filename,
                        tok_line,
                        format!("invalid character '{}' in UUID literal", uc),
                    ));
                }
                pos += 1;
            }
            let s: String = chars[start..pos].iter().collect();
            pos += 1; // closing '>'
            tokens.push(Spanned {
                token: Token::Uuid(s),
                line: tok_line,
            });
            continue;
        }

        // Number, optionally signed
        if c.is_ascii_digit()
            || ((c == '-' || c == '+') && pos + 1 < chars.len() && chars[pos + 1].is_ascii_digit())
        {
            let start = pos;
            if c == '-' || c == '+' {
                pos += 1;
            }
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            let mut is_float = false;
            if pos < chars.len()
                && chars[pos] == '.'
                && pos + 1 < chars.len()
                && chars[pos + 1].is_ascii_digit()
            {
                is_float = true;
                pos += 1; // consume '.'
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
            }
            if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
                let mut exp = pos + 1;
                if exp < chars.len() && (chars[exp] == '-' || chars[exp] == '+') {
                    exp += 1;
                }
                if exp < chars.len() && chars[exp].is_ascii_digit() {
                    is_float = true;
                    pos = exp;
                    while pos < chars.len() && chars[pos].is_ascii_digit() {
                        pos += 1;
                    }
                }
            }
            let s: String = chars[start..pos].iter().collect();
            if is_float {
                let f: f64 = s.parse().map_err(|_| {
                    ParseError::syntax(filename, tok_line, format!("invalid float '{}'", s))
                })?;
                tokens.push(Spanned {
                    token: Token::Float(f),
                    line: tok_line,
                });
            } else {
                let n: i64 = s.parse().map_err(|_| {
                    ParseError::syntax(filename, tok_line, format!("invalid integer '{}'", s))
                })?;
                tokens.push(Spanned {
                    token: Token::Int(n),
                    line: tok_line,
                });
            }
            continue;
        }

        // Punctuation
        let punct = match c {
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            '.' => Some(Token::Dot),
            _ => None,
        };
        if let Some(tok) = punct {
            tokens.push(Spanned {
                token: tok,
                line: tok_line,
            });
            pos += 1;
            continue;
        }

        // Identifier / keyword
        if c.is_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len()
                && (chars[pos].is_alphanumeric() || chars[pos] == '_' || chars[pos] == '-')
            {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            let token = keyword(&word).unwrap_or(Token::Name(word));
            tokens.push(Spanned {
                token,
                line: tok_line,
            });
            continue;
        }

        return Err(ParseError::syntax(
            filename,
            tok_line,
            format!("unexpected character '{}'", c),
        ));
    }

    tokens.push(Spanned {
        token: Token::Eof,
        line,
    });
    Ok(tokens)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
