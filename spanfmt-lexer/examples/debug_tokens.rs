use spanfmt_lexer::{Dialect, Lexer};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let input = if args.len() > 1 {
        &args[1]
    } else {
        "hello {} nyan {{literal}} {:?}\n"
    };
    let dialect = match args.get(2).map(String::as_str) {
        Some("percent") => Dialect::Percent,
        _ => Dialect::Brace,
    };

    println!("Tokenizing ({:?}): {:?}", dialect, input);
    println!();

    let lexer = Lexer::with_dialect(input, dialect);
    let mut count = 0;

    for result in lexer {
        count += 1;
        match result {
            Ok(piece_span) => {
                println!(
                    "Piece {}: {:?} at {:?}",
                    count, piece_span.piece, piece_span.span
                );
                println!("  Text: {:?}", &input[piece_span.span.clone()]);
                println!();
            }
            Err(e) => {
                println!("Error: {}", e);
                break;
            }
        }
    }

    println!("Total pieces: {}", count);
}
