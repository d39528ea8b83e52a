use std::path::Path;
use std::path::PathBuf;

use quadlife::pattern;
use quadlife::pattern::Format;

fn pattern_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/patterns")
}

#[test]
fn test_patterns() -> anyhow::Result<()> {
    let mut tested = 0;
    let mut failed = Vec::new();

    for entry in std::fs::read_dir(pattern_dir())? {
        let path = entry?.path();
        let bytes = std::fs::read(&path)?;

        match pattern::read_pattern(&bytes) {
            Ok(p) if p.cells.is_empty() => panic!("{path:?} has no live cells"),
            Ok(_) => tested += 1,
            Err(e) => failed.push((path.clone(), e)),
        }
    }

    if !failed.is_empty() {
        for (path, err) in &failed {
            eprintln!("Failed to parse {:?}: {:#}", path, err);
        }

        panic!(
            "{}/{} patterns failed to parse",
            failed.len(),
            tested + failed.len()
        );
    }

    println!("Successfully parsed {} patterns", tested);

    Ok(())
}

#[test]
fn formats_are_detected() -> anyhow::Result<()> {
    let cases = [
        ("glider.rle", Format::Rle),
        ("gosper_glider_gun.rle", Format::Rle),
        ("blinker.cells", Format::Plaintext),
        ("toad.lif", Format::Life105),
        ("lwss.life", Format::Life106),
    ];

    for (name, format) in cases {
        let bytes = std::fs::read(pattern_dir().join(name))?;

        assert_eq!(Format::detect(&bytes), format, "{name}");
    }

    Ok(())
}

#[test]
fn metadata() -> anyhow::Result<()> {
    let bytes = std::fs::read(pattern_dir().join("gosper_glider_gun.rle"))?;
    let gun = pattern::read_pattern(&bytes)?;

    assert_eq!(gun.name.as_deref(), Some("Gosper glider gun"));
    assert_eq!(gun.author.as_deref(), Some("Bill Gosper"));
    assert_eq!(gun.description.len(), 2);
    assert_eq!(gun.cells.len(), 36);

    let bytes = std::fs::read(pattern_dir().join("toad.lif"))?;
    let toad = pattern::read_pattern(&bytes)?;

    assert_eq!(toad.description, vec!["Toad", "A period 2 oscillator."]);
    assert_eq!(
        toad.cells,
        vec![(-1, -1), (0, -1), (1, -1), (-2, 0), (-1, 0), (0, 0)]
    );

    Ok(())
}
