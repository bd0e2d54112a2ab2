//! Command-line tokenizer
//!
//! A command line is whitespace-separated tokens: the command name followed by
//! its arguments. Each argument is classified as the `pc` literal, an integer
//! or a free-form word.

use logos::Logos;

/// Lexical classes of a single argument token
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// The live program counter
    #[token("pc")]
    Pc,

    /// Hexadecimal integer
    #[regex(r"0x[0-9a-fA-F]+", |lex| u64::from_str_radix(&lex.slice()[2..], 16).ok())]
    Hex(u64),

    /// Decimal integer
    #[regex(r"[0-9]+", |lex| lex.slice().parse().ok())]
    Decimal(u64),
}

/// A classified argument
///
/// `Pc` stays symbolic; it is resolved each time a command needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Pc,
    Integer(u64),
    Word(String),
}

/// Classify one token
///
/// Anything that is not exactly one `pc`, hex or decimal token (including
/// integers too wide for 64 bits) is a word.
pub fn classify(token: &str) -> Argument {
    let mut lexer = Token::lexer(token);
    let first = lexer.next();
    let whole = lexer.span() == (0..token.len());

    match (first, whole, lexer.next()) {
        (Some(Ok(Token::Pc)), true, None) => Argument::Pc,
        (Some(Ok(Token::Hex(value))), true, None) | (Some(Ok(Token::Decimal(value))), true, None) => {
            Argument::Integer(value)
        }
        _ => Argument::Word(token.to_string()),
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<Argument>,
    /// Argument tokens exactly as typed
    pub raw_args: Vec<String>,
    /// Line text after the name, trimmed but otherwise untouched
    pub rest: String,
}

/// Split `line` into a command; `None` for a blank line
pub fn parse_line(line: &str) -> Option<CommandLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let raw_args: Vec<String> = rest.split_whitespace().map(String::from).collect();
    let args = raw_args.iter().map(|t| classify(t)).collect();

    Some(CommandLine {
        name: name.to_string(),
        args,
        raw_args,
        rest: rest.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integers() {
        assert_eq!(classify("0x2a"), Argument::Integer(42));
        assert_eq!(classify("0x2A"), Argument::Integer(42));
        assert_eq!(classify("42"), Argument::Integer(42));
        assert_eq!(classify("0"), Argument::Integer(0));
    }

    #[test]
    fn test_classify_pc_and_words() {
        assert_eq!(classify("pc"), Argument::Pc);
        assert_eq!(classify("foo"), Argument::Word("foo".to_string()));
        assert_eq!(classify("pcx"), Argument::Word("pcx".to_string()));
        assert_eq!(classify("PC"), Argument::Word("PC".to_string()));
    }

    #[test]
    fn test_classify_mixed_tokens_are_words() {
        assert_eq!(classify("12ab"), Argument::Word("12ab".to_string()));
        assert_eq!(classify("0xZZ"), Argument::Word("0xZZ".to_string()));
        assert_eq!(classify("0x"), Argument::Word("0x".to_string()));
        assert_eq!(classify("-1"), Argument::Word("-1".to_string()));
    }

    #[test]
    fn test_classify_overflow_is_word() {
        let wide = "0x1ffffffffffffffff";
        assert_eq!(classify(wide), Argument::Word(wide.to_string()));
    }

    #[test]
    fn test_parse_line() {
        let line = parse_line("  defm  m next 0x10 pc ").unwrap();
        assert_eq!(line.name, "defm");
        assert_eq!(line.raw_args, vec!["m", "next", "0x10", "pc"]);
        assert_eq!(
            line.args,
            vec![
                Argument::Word("m".to_string()),
                Argument::Word("next".to_string()),
                Argument::Integer(16),
                Argument::Pc,
            ]
        );
    }

    #[test]
    fn test_parse_line_keeps_rest_verbatim() {
        let line = parse_line("load  my  image\t1.img \n").unwrap();
        assert_eq!(line.name, "load");
        assert_eq!(line.rest, "my  image\t1.img");
        assert_eq!(line.raw_args, vec!["my", "image", "1.img"]);

        assert_eq!(parse_line("pc").unwrap().rest, "");
    }

    #[test]
    fn test_parse_blank_line() {
        assert!(parse_line("").is_none());
        assert!(parse_line(" \t ").is_none());
    }
}
