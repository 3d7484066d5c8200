use std::io::{self, BufRead, Write};
use colorfinder::{Color, ColorError, NamedColor, Palette};

const PROMPT: &str = "Enter color (#ffffff or 255 255 255)> ";

/// REPL mode - prompt for colors until an empty line, `quit`, `exit` or EOF
pub fn run_repl<R: BufRead, W: Write>(
    palette: &Palette,
    limit: usize,
    mut input: R,
    out: &mut W,
) -> io::Result<()> {
    banner(out)?;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        // read_line would fail the whole session on invalid UTF-8
        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        writeln!(out)?;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() || line == "quit" || line == "exit" {
            break;
        }

        if line == "help" {
            print_help(out)?;
            continue;
        }

        match Color::parse(line) {
            Ok(query) => print_matches(out, &palette.search(&query, limit))?,
            Err(error) => {
                tracing::debug!(input = line, %error, "rejected color input");
                writeln!(out, "Can't parse color: {}", line)?;
                writeln!(out, "    {}", error)?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Single-command mode - search one color and print its matches
pub fn find<W: Write>(
    palette: &Palette,
    limit: usize,
    color: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let query = Color::parse(color.trim())
        .map_err(|e: ColorError| anyhow::anyhow!("Can't parse color '{}': {}", color, e))?;
    print_matches(out, &palette.search(&query, limit))?;
    Ok(())
}

fn print_matches<W: Write>(out: &mut W, matches: &[NamedColor]) -> io::Result<()> {
    writeln!(out, "Found {} matches:", matches.len())?;
    for m in matches {
        writeln!(out, " *  Color {} ({}) @ {}", capitalize(&m.name), m.id, m.distance)?;
    }
    Ok(())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "+=======================================+")?;
    writeln!(out, "|   A C M E   C O L O R   F I N D E R   |")?;
    writeln!(out, "+=======================================+")?;
    writeln!(out, "Type 'help' for usage, an empty line or 'quit' to exit\n")
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Enter a color in one of these forms:")?;
    writeln!(out, "  #rrggbb        - Hex color code, e.g. #ff8000")?;
    writeln!(out, "  r g b          - Three numbers from 0 to 255, e.g. 255 128 0")?;
    writeln!(out, "  help           - Show this help")?;
    writeln!(out, "  quit, exit     - Exit the program")
}

#[cfg(test)]
mod cli_test {
    use super::*;
    use colorfinder::Candidate;
    use std::io::Cursor;

    fn palette() -> Palette {
        let mut palette = Palette::new();
        palette.insert(Candidate::new("A", "red", Color::new(255, 0, 0)));
        palette.insert(Candidate::new("B", "maroon", Color::new(128, 0, 0)));
        palette.insert(Candidate::new("C", "blue", Color::new(0, 0, 255)));
        palette
    }

    fn repl(input: &str, limit: usize) -> String {
        let mut out = Vec::new();
        run_repl(&palette(), limit, Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_repl_prints_matches() {
        let output = repl("#ff0000\n", 2);

        assert!(output.contains("Found 2 matches:"));
        assert!(output.contains(" *  Color Red (A) @ 0"));
        assert!(output.contains(" *  Color Maroon (B) @ 16129"));
        assert!(!output.contains("Blue"));
    }

    #[test]
    fn test_repl_recovers_from_bad_input() {
        let output = repl("300 0 0\n0 0 255\n", 1);

        assert!(output.contains("Can't parse color: 300 0 0"));
        assert!(output.contains("300"));
        assert!(output.contains(" *  Color Blue (C) @ 0"));
    }

    #[test]
    fn test_repl_stops_on_empty_line() {
        let output = repl("\n0 0 255\n", 3);
        assert!(!output.contains("Found"));
    }

    #[test]
    fn test_repl_stops_on_quit_and_eof() {
        assert!(!repl("quit\n#ff0000\n", 3).contains("Found"));
        assert!(repl("", 3).contains("C O L O R"));
    }

    #[test]
    fn test_repl_recovers_from_invalid_utf8() {
        let mut out = Vec::new();
        let result = run_repl(&palette(), 1, Cursor::new(&b"\xff\xfe\n#ff0000\n"[..]), &mut out);
        let output = String::from_utf8(out).unwrap();

        assert!(result.is_ok());
        assert!(output.contains("Can't parse color: \u{fffd}\u{fffd}"));
        assert!(output.contains(" *  Color Red (A) @ 0"));
    }

    #[test]
    fn test_repl_help() {
        assert!(repl("help\n", 3).contains("#rrggbb"));
    }

    #[test]
    fn test_find() {
        let mut out = Vec::new();
        find(&palette(), 1, "128 0 0", &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Color Maroon (B) @ 0"));

        let mut out = Vec::new();
        assert!(find(&palette(), 1, "#abcd", &mut out).is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("aliceblue"), "Aliceblue");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }
}
