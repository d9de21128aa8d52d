//! Basic encode/decode with derived types.

use serde::Serialize;

#[derive(Serialize)]
struct Directory {
    users: Vec<User>,
}

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
    role: String,
}

fn main() -> ploon::Result<()> {
    let dir = Directory {
        users: vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                role: "admin".to_string(),
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                role: "user".to_string(),
            },
        ],
    };

    let text = ploon::to_string(&dir)?;
    println!("Standard form:\n{}\n", text);

    let compact = ploon::to_string_compact(&dir)?;
    println!("Compact form:\n{}\n", compact);

    let back = ploon::parse(&text)?;
    println!("Decoded tree:\n{:#?}", back);
    Ok(())
}
