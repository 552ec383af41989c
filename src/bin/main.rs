use lox_scanner::{scan, Diagnostics, Token};
use std::{
    env,
    io::{self, Write},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_prompt(&mut stdout, &mut stderr)?,
        2 => {
            if !run_file(args[1].as_str(), &mut stdout, &mut stderr)? {
                std::process::exit(65);
            }
        },
        _ => {
            writeln!(stdout, "Usage: lox-scan [script]")?;
            std::process::exit(64);
        },
    };

    Ok(())
}

/// Returns `false` if the file had lexical errors.
fn run_file<Out: Write, ErrOut: Write>(path: &str, out: &mut Out, err_out: &mut ErrOut) -> io::Result<bool> {
    let contents = std::fs::read_to_string(path)?;
    tracing::info!(path, bytes = contents.len(), "scanning file");
    run(contents.as_str(), out, err_out)
}

fn run_prompt<Out: Write, ErrOut: Write>(out: &mut Out, err_out: &mut ErrOut) -> io::Result<()> {
    let mut buffer = String::new();
    let stdin = io::stdin();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };

        run(buffer.as_str(), out, err_out)?;
    }

    Ok(())
}

fn run<Out: Write, ErrOut: Write>(source: &str, out: &mut Out, err_out: &mut ErrOut) -> io::Result<bool> {
    let mut diagnostics = Diagnostics::new();
    let tokens = scan(source, &mut diagnostics);

    print_tokens(&tokens, out)?;
    for e in diagnostics.errors() {
        writeln!(err_out, "{}", e)?;
    }

    Ok(!diagnostics.had_error())
}

fn print_tokens<Out: Write>(tokens: &[Token], out: &mut Out) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_one_token_per_line() -> io::Result<()> {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        let clean = run("var x = 1;", &mut out, &mut err_out)?;

        assert!(clean);
        assert!(err_out.is_empty());
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            "VAR var null\nIDENTIFIER x null\nEQUAL = null\nNUMBER 1 1\nSEMICOLON ; null\nEND_OF_INPUT  null\n",
            printed
        );
        Ok(())
    }

    #[test]
    fn errors_go_to_error_output() -> io::Result<()> {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        let clean = run("\n@", &mut out, &mut err_out)?;

        assert!(!clean);
        assert_eq!("END_OF_INPUT  null\n", String::from_utf8(out).unwrap());
        assert_eq!("[line 2] Error: Unexpected character.\n", String::from_utf8(err_out).unwrap());
        Ok(())
    }
}
