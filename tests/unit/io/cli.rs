//! Tests for argument parsing and end-to-end runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;
    use wavetile::WaveError;
    use wavetile::io::cli::{Cli, Runner, TileSize, fingerprint_table};
    use wavetile::io::image::{load_tile, save_png};
    use wavetile::spatial::direction::Direction;
    use wavetile::spatial::fingerprint::Fingerprint;
    use wavetile::spatial::tiles::ModuleCatalog;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wavetile").chain(args.iter().copied())).unwrap()
    }

    fn write_tile(dir: &Path, name: &str, tile: &RgbaImage) {
        save_png(tile, &dir.join(name)).unwrap();
    }

    // Edges of this tile never match each other, so it cannot sit beside itself
    fn lonely_tile() -> RgbaImage {
        RgbaImage::from_fn(6, 6, |x, y| match (x, y) {
            (_, 0) => Rgba([255, 0, 0, 255]),
            (_, 5) => Rgba([0, 0, 255, 255]),
            (0, _) => Rgba([0, 255, 0, 255]),
            (5, _) => Rgba([255, 255, 0, 255]),
            _ => Rgba([0, 0, 0, 255]),
        })
    }

    #[test]
    fn test_defaults() {
        let args = cli(&["tiles"]);
        assert_eq!((args.width, args.height), (8, 8));
        assert_eq!(args.seed, 42);
        assert_eq!(args.attempts, 200);
        assert_eq!(args.samples, 3);
        assert_eq!(args.discard_bits, 0);
        assert!(args.sheet.is_none());
        assert!(args.borders.is_empty());
        assert!(args.should_show_progress());
        assert_eq!(args.output_path(), Path::new("output/42.png"));
    }

    #[test]
    fn test_flags_and_repeated_borders() {
        let args = cli(&[
            "sheet.png", "-W", "12", "-H", "3", "-s", "7", "-o", "maps/{seed}-map.png", "--sheet",
            "16x8", "-b", "up=d4789c1e", "--border", "left=abc", "-q",
        ]);
        assert_eq!((args.width, args.height), (12, 3));
        assert_eq!(
            args.sheet,
            Some(TileSize {
                width: 16,
                height: 8
            })
        );
        assert_eq!(args.borders.len(), 2);
        assert_eq!(args.borders.get(1).map(|border| border.side), Some(Direction::Left));
        assert!(!args.should_show_progress());
        assert_eq!(args.output_path(), Path::new("maps/7-map.png"));
    }

    #[test]
    fn test_invalid_values_are_rejected_by_the_parser() {
        let with = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("wavetile").chain(args.iter().copied()))
        };
        assert!(with(&["tiles", "--sheet", "16"]).is_err());
        assert!(with(&["tiles", "-b", "sideways=abc"]).is_err());
        assert!(with(&[]).is_err());
    }

    #[test]
    fn test_tile_size_parse() {
        let size: TileSize = "32X24".parse().unwrap();
        assert_eq!((size.width, size.height), (32, 24));
        assert!("32".parse::<TileSize>().is_err());
        assert!("ax2".parse::<TileSize>().is_err());
    }

    #[test]
    fn test_fingerprint_table_lists_every_edge() {
        let catalog = ModuleCatalog::from_adjacencies(vec![(
            (),
            [
                Fingerprint::from_u64(1),
                "abc".parse().unwrap(),
                "d".parse().unwrap(),
                "e".parse().unwrap(),
            ],
        )])
        .unwrap();
        let table = fingerprint_table(&catalog);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines.first(), Some(&"| Tile | Direction | Fingerprint |"));
        assert!(table.contains("| Down      | abc"));
    }

    // Tests a folder of solid tiles solves and writes the composed image
    #[test]
    fn test_run_writes_image() {
        let tiles = TempDir::new().unwrap();
        write_tile(tiles.path(), "red.png", &RgbaImage::from_pixel(6, 6, Rgba([255, 0, 0, 255])));
        write_tile(tiles.path(), "blue.png", &RgbaImage::from_pixel(6, 6, Rgba([0, 0, 255, 255])));
        let out = TempDir::new().unwrap();
        let template = out.path().join("map-{seed}.png");

        let args = cli(&[
            tiles.path().to_str().unwrap(),
            "-W", "4", "-H", "3", "-s", "7", "-q",
            "-o", template.to_str().unwrap(),
        ]);
        let summary = Runner::new(args).run().unwrap();

        let written = out.path().join("map-7.png");
        assert_eq!(summary.modules, 2);
        assert_eq!(summary.output.as_deref(), Some(written.as_path()));
        assert_eq!(summary.attempts, 1);
        assert_eq!(load_tile(&written).unwrap().dimensions(), (24, 18));
    }

    // Tests the best-effort grid is still written when every attempt fails
    // Verified by returning before export on exhaustion
    #[test]
    fn test_run_exports_exhausted_grid() {
        let tiles = TempDir::new().unwrap();
        write_tile(tiles.path(), "lonely.png", &lonely_tile());
        let out = TempDir::new().unwrap();
        let output = out.path().join("failed.png");

        let args = cli(&[
            tiles.path().to_str().unwrap(),
            "-W", "2", "-H", "1", "-a", "3", "-q",
            "-o", output.to_str().unwrap(),
        ]);
        let result = Runner::new(args).run();

        assert!(matches!(result, Err(WaveError::Exhausted { attempts: 3, .. })));
        let image = load_tile(&output).unwrap();
        assert_eq!(image.dimensions(), (12, 6));
    }

    #[test]
    fn test_fingerprints_mode_skips_solving() {
        let tiles = TempDir::new().unwrap();
        write_tile(tiles.path(), "lonely.png", &lonely_tile());

        let args = cli(&[tiles.path().to_str().unwrap(), "--fingerprints", "-q"]);
        let summary = Runner::new(args).run().unwrap();
        assert_eq!(summary.modules, 1);
        assert!(summary.output.is_none());
    }

    #[test]
    fn test_run_rejects_bad_tilesets() {
        let tiles = TempDir::new().unwrap();
        let empty = cli(&[tiles.path().to_str().unwrap(), "-q"]);
        assert!(matches!(
            Runner::new(empty).run(),
            Err(WaveError::EmptyCatalog)
        ));

        let file = tiles.path().join("sheet.png");
        save_png(&lonely_tile(), &file).unwrap();
        let not_a_folder = cli(&[file.to_str().unwrap(), "-q"]);
        assert!(matches!(
            Runner::new(not_a_folder).run(),
            Err(WaveError::InvalidParameter { parameter: "tileset", .. })
        ));

        let as_sheet = cli(&[file.to_str().unwrap(), "--sheet", "3x3", "--fingerprints", "-q"]);
        let summary = Runner::new(as_sheet).run().unwrap();
        assert_eq!(summary.modules, 4);
    }
}
