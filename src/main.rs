// Command-line driver
// Thin interactive front end over the rsa and util modules: prompts for
// a file, runs the pipeline, reports success or failure. All crypto
// lives in the library.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use textbook_rsa::rsa::{cipher, KeyPair};
use textbook_rsa::util::keyfile;
use textbook_rsa::CryptoError;

const PUBLIC_KEY_PATH: &str = "keys/public_key.pem";
const PRIVATE_KEY_PATH: &str = "keys/private_key.pem";
const ENCRYPTED_PATH: &str = "files/encrypted.txt";
const DECRYPTED_PATH: &str = "files/decrypted.txt";

fn main() {
    let mode = std::env::args().nth(1);
    let result = match mode.as_deref() {
        Some("encrypt") => run_encrypt(),
        Some("decrypt") => run_decrypt(),
        _ => {
            eprintln!("usage: textbook-rsa <encrypt|decrypt>");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_encrypt() -> Result<()> {
    let (file_name, text) = prompt_readable_file("\nEnter the file to encrypt: ")?;
    let key_size = prompt_key_size()?;

    match cipher::encrypt(&text, key_size) {
        Ok(sealed) => {
            export_sealed(&sealed)?;
            println!("File {} was successfully encrypted.", file_name);
            Ok(())
        }
        Err(CryptoError::OversizedMessage { bits, key_size }) => {
            println!(
                "Failed to encrypt: file needs {} bits but the key is only {} bits.",
                bits, key_size
            );
            Ok(())
        }
        Err(e) => Err(e).context("encryption failed"),
    }
}

fn run_decrypt() -> Result<()> {
    loop {
        let file_name = prompt_line("\nEnter the file to decrypt (or q to quit): ")?;
        if file_name == "q" {
            return Ok(());
        }

        match decrypt_file(Path::new(&file_name)) {
            Ok(text) => {
                keyfile::write_decrypted(Path::new(DECRYPTED_PATH), &text)
                    .context("failed to write decrypted output")?;
                println!("File {} was successfully decrypted.", file_name);
                return Ok(());
            }
            Err(e) => {
                // Missing or malformed inputs are retryable; let the
                // user pick another file rather than aborting.
                println!("Failed to decrypt: {:#}", e);
            }
        }
    }
}

fn decrypt_file(path: &Path) -> Result<String> {
    let ciphertext = keyfile::read_ciphertext(path)?;
    let (n, e) = keyfile::read_public_key(Path::new(PUBLIC_KEY_PATH))?;
    let d = keyfile::read_private_key(Path::new(PRIVATE_KEY_PATH))?;

    let key_size = n.bits() as u32;
    let key_pair = KeyPair { key_size, n, e, d };

    cipher::decrypt(&ciphertext, &key_pair).context("ciphertext did not decode")
}

fn export_sealed(sealed: &cipher::Sealed) -> Result<()> {
    std::fs::create_dir_all("keys").context("failed to create keys/")?;
    std::fs::create_dir_all("files").context("failed to create files/")?;

    keyfile::write_public_key(Path::new(PUBLIC_KEY_PATH), &sealed.key_pair)?;
    keyfile::write_private_key(Path::new(PRIVATE_KEY_PATH), &sealed.key_pair)?;
    keyfile::write_ciphertext(Path::new(ENCRYPTED_PATH), &sealed.ciphertext)?;
    Ok(())
}

/// Prompt for a path until the file can actually be read
fn prompt_readable_file(prompt: &str) -> Result<(String, String)> {
    loop {
        let file_name = prompt_line(prompt)?;
        match std::fs::read_to_string(&file_name) {
            Ok(text) => return Ok((file_name, text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                println!("File {} was not found.", file_name);
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                println!("Permission denied for {}.", file_name);
            }
            Err(e) => {
                println!("Error occurred while reading {}: {}.", file_name, e);
            }
        }
    }
}

/// Prompt for the key size until it is one of the supported values
fn prompt_key_size() -> Result<u32> {
    loop {
        let answer = prompt_line("Enter the encryption key size (1024 or 2048): ")?;
        match answer.parse::<u32>() {
            Ok(size @ (1024 | 2048)) => return Ok(size),
            _ => println!("Invalid key size. Please enter 1024 or 2048."),
        }
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read stdin")?;
    Ok(line.trim().to_string())
}
