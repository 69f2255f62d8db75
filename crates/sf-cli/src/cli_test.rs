use super::*;

#[test]
fn test_parse_build() {
    let cli = Cli::try_parse_from([
        "sf", "build", "--db", "shop.sqlite", "--out", "shop.json",
    ])
    .unwrap();
    match cli.command {
        Commands::Build(args) => {
            assert_eq!(args.db.to_str(), Some("shop.sqlite"));
            assert_eq!(args.out.to_str(), Some("shop.json"));
            assert!(args.metadata_dir.is_none());
        }
        _ => panic!("expected build command"),
    }
}

#[test]
fn test_parse_batch_with_flags() {
    let cli = Cli::try_parse_from([
        "sf",
        "batch",
        "--root",
        "data/bird",
        "--out-root",
        "out/bird",
        "--workers",
        "4",
        "--skip-existing",
    ])
    .unwrap();
    match cli.command {
        Commands::Batch(args) => {
            assert_eq!(args.workers, Some(4));
            assert!(args.skip_existing);
        }
        _ => panic!("expected batch command"),
    }
}

#[test]
fn test_parse_schema_with_fks() {
    let cli = Cli::try_parse_from(["sf", "schema", "--artifact", "shop.json", "--fks"]).unwrap();
    match cli.command {
        Commands::Schema(args) => {
            assert!(args.fks);
        }
        _ => panic!("expected schema command"),
    }
}

#[test]
fn test_global_verbose_flag_after_subcommand() {
    let cli = Cli::try_parse_from([
        "sf", "build", "--db", "a.sqlite", "--out", "a.json", "--verbose",
    ])
    .unwrap();
    assert!(cli.global.verbose);
}

#[test]
fn test_missing_required_args_rejected() {
    assert!(Cli::try_parse_from(["sf", "build", "--db", "a.sqlite"]).is_err());
    assert!(Cli::try_parse_from(["sf", "batch"]).is_err());
}
