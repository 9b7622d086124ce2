//! Human-readable dumps of an analyzed [`Grammar`].
//!
//! The output is line oriented with a record tag in the first field, so it
//! can be diffed between grammar revisions or grepped:
//!
//! ```text
//! PS,3
//!
//! P,0,S' -> expr
//! P,1,expr -> expr PLUS expr
//! P,2,expr -> NUMBER
//! ```

use crate::{EMPTY, Grammar};
use std::io::{self, Write};

/// Writes every production, the augmented one included, in number order.
///
/// # Output Format
/// ```text
/// PS,<number of productions>
///
/// P,<number>,<LHS> -> <RHS symbols> [<assoc>, <level>]
/// ```
/// The precedence suffix is only written for productions whose precedence
/// differs from the default.
pub fn write_prods<A, W: Write>(out: &mut W, g: &Grammar<A>) -> io::Result<()> {
    writeln!(out, "PS,{}\n", g.productions().count())?;
    for p in g.productions() {
        write!(out, "P,{},{}", p.number(), p)?;
        if p.precedence() != Default::default() {
            write!(out, " {}", p.precedence())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the FIRST set of every nonterminal, then the FOLLOW set of every
/// nonterminal. Nullable nonterminals list `` `empty' `` first.
///
/// # Output Format
/// ```text
/// FIRST,<nonterminal>,{<terminal>, ...}
/// FOLLOW,<nonterminal>,{<terminal>, ...}
/// ```
pub fn write_first_follow<A, W: Write>(out: &mut W, g: &Grammar<A>) -> io::Result<()> {
    for (label, sets) in [("FIRST", g.first()), ("FOLLOW", g.follow())] {
        for name in g.nonterminals().names() {
            let Some(set) = sets.get(name) else {
                continue;
            };
            write!(out, "{},{},{{", label, name)?;
            if set.contains(EMPTY) {
                write!(out, "`empty', ")?;
            }
            for t in set.iter().filter(|t| t.as_str() != EMPTY) {
                write!(out, "{}, ", t)?;
            }
            writeln!(out, "}}")?;
        }
    }
    Ok(())
}

/// Writes the LR item chain of every production, one blank line between
/// productions.
///
/// # Output Format
/// ```text
/// I,<number>,<index>,<LHS> -> <dotted RHS>
/// ```
pub fn write_lr_items<A, W: Write>(out: &mut W, g: &Grammar<A>) -> io::Result<()> {
    for p in g.productions() {
        for item in p.lr_items() {
            writeln!(out, "I,{},{},{}", item.number(), item.lr_index(), item)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzed() -> Grammar {
        let mut g = Grammar::new(["NUMBER", "PLUS", "SEMI"]);
        g.set_precedence("PLUS", "left", 1).unwrap();
        g.add_production("stmt", ["expr", "opt_semi"], None, None).unwrap();
        g.add_production("expr", ["expr", "PLUS", "expr"], None, None).unwrap();
        g.add_production("expr", ["NUMBER"], None, None).unwrap();
        g.add_production("opt_semi", ["SEMI"], None, None).unwrap();
        g.add_production("opt_semi", [""; 0], None, None).unwrap();
        g.set_start().unwrap();
        g.compute_first();
        g.compute_follow().unwrap();
        g.build_lr_items();
        g
    }

    fn render(f: impl Fn(&mut Vec<u8>, &Grammar) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out, &analyzed()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prods() {
        let text = render(|out, g| write_prods(out, g));
        let expected = "\
PS,6

P,0,S' -> stmt
P,1,stmt -> expr opt_semi
P,2,expr -> expr PLUS expr (left, 1)
P,3,expr -> NUMBER
P,4,opt_semi -> SEMI
P,5,opt_semi ->
";
        assert_eq!(text, expected);
    }

    #[test]
    fn first_follow() {
        let text = render(|out, g| write_first_follow(out, g));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "FIRST,stmt,{NUMBER, }");
        assert_eq!(lines[2], "FIRST,opt_semi,{`empty', SEMI, }");
        assert_eq!(lines[3], "FOLLOW,stmt,{$end, }");
        assert!(lines[4].starts_with("FOLLOW,expr,{"));
        for t in ["PLUS", "SEMI", "$end"] {
            assert!(lines[4].contains(t), "{t} missing from {}", lines[4]);
        }
    }

    #[test]
    fn lr_items() {
        let text = render(|out, g| write_lr_items(out, g));
        assert!(text.starts_with("I,0,0,S' -> . stmt\nI,0,1,S' -> stmt .\n\n"));
        assert!(text.contains("I,2,1,expr -> expr . PLUS expr\n"));
        assert!(text.ends_with("I,5,0,opt_semi -> .\n\n"));
        // 2 + 3 + 4 + 2 + 2 + 1 items, one blank line per production
        assert_eq!(text.lines().filter(|l| l.starts_with("I,")).count(), 14);
        assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 6);
    }
}
