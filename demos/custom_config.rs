//! Swapping the delimiter alphabet and decoding leniently.

use ploon::{ploon, Config, Decoder, Format};

fn main() -> ploon::Result<()> {
    let value = ploon!({
        "orders": [
            {"id": 101, "customer": {"name": "Alice"}, "tags": ["rush", "gift"]}
        ]
    });

    // Caret field delimiter, tilde record separator.
    let config = Config::standard()
        .with_field_delimiter('^')
        .with_record_separator('~');
    let text = ploon::stringify_with_config(&value, Format::Compact, &config)?;
    println!("Custom alphabet:\n{}\n", text);

    let back = Decoder::new(config.clone()).decode(&text)?;
    println!("Decoded:\n{:#?}\n", back);

    // Lenient decoding drops the malformed record instead of failing.
    let dirty = "[items#2](id)\n\nabc:1|7\n1:2|42";
    let lenient = Decoder::new(Config::standard()).lenient().decode(dirty)?;
    println!("Lenient decode of dirty input:\n{:#?}", lenient);
    Ok(())
}
