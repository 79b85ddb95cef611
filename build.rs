use csv::StringRecord;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

struct Holiday {
    ident: String,
    code: u8,
    kind: String,
    english: String,
    hebrew: String,
}

struct Parasha {
    ident: String,
    code: u8,
    english: String,
    hebrew: String,
}

fn read_rows(path: &Path) -> Vec<StringRecord> {
    println!("cargo:rerun-if-changed={}", path.display());
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(match File::open(path) {
            Ok(it) => it,
            Err(_) => {
                panic!("missing {}", path.display())
            }
        }))
        .records()
        .filter_map(Result::ok)
        .collect()
}

fn parse_holiday_row(row: StringRecord) -> Holiday {
    let mut it = row.iter().map(String::from);

    Holiday {
        ident: it.next().expect("invalid row in holidays.csv"),
        code: {
            let code = it.next().expect("invalid row in holidays.csv");
            code.parse().expect("invalid code in holidays.csv")
        },
        kind: it.next().expect("invalid row in holidays.csv"),
        english: it.next().expect("invalid row in holidays.csv"),
        hebrew: it.next().expect("invalid row in holidays.csv"),
    }
}

fn parse_parasha_row(row: StringRecord) -> Parasha {
    let mut it = row.iter().map(String::from);

    Parasha {
        ident: it.next().expect("invalid row in parashot.csv"),
        code: {
            let code = it.next().expect("invalid row in parashot.csv");
            code.parse().expect("invalid code in parashot.csv")
        },
        english: it.next().expect("invalid row in parashot.csv"),
        hebrew: it.next().expect("invalid row in parashot.csv"),
    }
}

fn gen_holiday_enum_decl<W: Write>(out: &mut W, holidays: &[Holiday]) -> std::io::Result<()> {
    let mut reverse_lookup = phf_codegen::Map::<String>::new();

    out.write_all(b"declare_holidays![\n")?;
    for h in holidays {
        writeln!(
            out,
            "{}: {} {} {:?} {:?},",
            h.ident, h.code, h.kind, h.english, h.hebrew
        )?;
        reverse_lookup.entry(h.english.to_lowercase(), format!("Holiday::{}", h.ident));
    }
    out.write_all(b"];\n")?;

    writeln!(
        out,
        "pub(crate) static NAME_TO_HOLIDAY: phf::Map<&'static str, Holiday> = {};",
        reverse_lookup.build()
    )?;

    Ok(())
}

fn gen_parasha_enum_decl<W: Write>(out: &mut W, parashot: &[Parasha]) -> std::io::Result<()> {
    let mut reverse_lookup = phf_codegen::Map::<String>::new();

    out.write_all(b"declare_parashot![\n")?;
    for p in parashot {
        writeln!(out, "{}: {} {:?} {:?},", p.ident, p.code, p.english, p.hebrew)?;
        reverse_lookup.entry(p.english.to_lowercase(), format!("Parasha::{}", p.ident));
    }
    out.write_all(b"];\n")?;

    writeln!(
        out,
        "pub(crate) static NAME_TO_PARASHA: phf::Map<&'static str, Parasha> = {};",
        reverse_lookup.build()
    )?;

    Ok(())
}

fn main() {
    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(&std::env::var("OUT_DIR").unwrap());

    let mut holidays: Vec<Holiday> = read_rows(&root.join("holidays.csv"))
        .into_iter()
        .map(parse_holiday_row)
        .collect();
    holidays.sort_by_key(|it| it.code);

    let holidays_out = out_dir.join("decl_holidays.rs");
    let mut holidays_out =
        BufWriter::new(File::create(holidays_out).expect("unable to create decl_holidays.rs"));
    gen_holiday_enum_decl(&mut holidays_out, &holidays).unwrap();

    let mut parashot: Vec<Parasha> = read_rows(&root.join("parashot.csv"))
        .into_iter()
        .map(parse_parasha_row)
        .collect();
    parashot.sort_by_key(|it| it.code);

    let parashot_out = out_dir.join("decl_parashot.rs");
    let mut parashot_out =
        BufWriter::new(File::create(parashot_out).expect("unable to create decl_parashot.rs"));
    gen_parasha_enum_decl(&mut parashot_out, &parashot).unwrap();
}
