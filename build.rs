use std::{
    env,
    fs::{self, File},
    io::{self, BufWriter, Write},
};

// Take all files under `decks` and turn them into a file that contains a map with their contents
// by name. This is pulled in deck/builtin.rs to offer the decks that ship with the binary.
fn build_decks(out_dir: &str) -> io::Result<()> {
    let output_path = format!("{out_dir}/decks.rs");
    let mut output_file = BufWriter::new(File::create(output_path)?);
    output_file.write_all(b"use std::collections::BTreeMap as Map;\n")?;
    output_file.write_all(b"use once_cell::sync::Lazy;\n")?;
    output_file.write_all(b"static DECKS: Lazy<Map<&'static str, &'static [u8]>> = Lazy::new(|| Map::from([\n")?;

    let mut paths = fs::read_dir("decks")?.collect::<io::Result<Vec<_>>>()?;
    paths.sort_by_key(|e| e.path());
    for deck_file in paths {
        let metadata = deck_file.metadata()?;
        if !metadata.is_file() {
            panic!("found non file in decks directory");
        }
        let path = deck_file.path();
        let file_name = path.file_name().unwrap().to_string_lossy();
        let (deck_name, extension) = file_name.split_once('.').unwrap();
        if extension != "yaml" {
            panic!("extension must be 'yaml'");
        }
        let contents = fs::read(&path)?;
        output_file.write_all(format!("(\"{deck_name}\", {contents:?}.as_slice()),\n").as_bytes())?;
    }
    output_file.write_all(b"]));\n")?;

    // Rebuild if anything changes.
    println!("cargo:rerun-if-changed=decks");
    Ok(())
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").unwrap();
    build_decks(&out_dir)?;
    Ok(())
}
