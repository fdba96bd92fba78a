#[cfg(test)]
mod batch_tests {
    use std::{fs, path::Path};

    use crate::{
        batch::{BatchReport, Converter, InputSelector, build_luts},
        color::{Color, Coordinate},
        config::ConverterConfig,
        error::UvMapperError,
        lut::{index::ColorIndex, template::identity_template},
        tests::utils::{TestDir, palette_frame, palette_lut},
        texture::{Texture, TextureRef},
        utils::image::{decode, encode},
    };

    fn config_in(root: &Path) -> ConverterConfig {
        ConverterConfig {
            animations_dir: root.join("animations"),
            luts_dir: root.join("lut"),
            output_dir: root.join("converted"),
            clothes_dir: root.join("clothes"),
            template_path: root.join("map_template.png"),
            ..ConverterConfig::default()
        }
    }

    /// Write a LUT for `part_file` and return its palette
    fn write_lut(config: &ConverterConfig, part_file: &str) -> Vec<Color> {
        fs::create_dir_all(&config.luts_dir).unwrap();
        let (lut, palette) = palette_lut(16, 16);
        encode(&lut, config.luts_dir.join(part_file)).unwrap();
        palette
    }

    fn write_frame(config: &ConverterConfig, animation: &str, file: &str, frame: &Texture) {
        let dir = config.animations_dir.join(animation);
        fs::create_dir_all(&dir).unwrap();
        encode(frame, dir.join(file)).unwrap();
    }

    fn assert_converted(config: &ConverterConfig, palette: &[Color], frame: &Texture, output: &Path) {
        let lut = Texture::from_colors(16, 16, palette).unwrap();
        let index = ColorIndex::from_texture(&lut).unwrap();
        let converted = decode(output).unwrap();
        assert_eq!(converted.shape(), frame.shape());
        for (src, dst) in frame.colors().zip(converted.colors()) {
            assert_eq!((dst.b, dst.a), (0, 255));
            assert_eq!(index.get(&src), Some(Coordinate::new(dst.r, dst.g)));
        }
        assert!(output.starts_with(&config.output_dir));
    }

    #[test]
    fn test_convert_single_animation() {
        let dir = TestDir::new("batch_single_animation");
        let config = config_in(dir.path());
        let body = write_lut(&config, "body.png");
        let cape = write_lut(&config, "cape.png");
        let body_frame = palette_frame(&body, 24, 12);
        let cape_frame = palette_frame(&cape, 8, 30);
        write_frame(&config, "stabbing", "body.png", &body_frame);
        write_frame(&config, "stabbing", "cape.png", &cape_frame);

        let report = Converter::new(config.clone())
            .convert(&InputSelector::Animation("stabbing".into()))
            .unwrap();

        assert_eq!(
            report,
            BatchReport {
                animations: 1,
                frames: 2,
                luts: 2
            }
        );
        let out = config.output_dir.join("stabbing");
        assert_converted(&config, &body, &body_frame, &out.join("body.png"));
        assert_converted(&config, &cape, &cape_frame, &out.join("cape.png"));
    }

    #[test]
    fn test_convert_all_reuses_indices() {
        let dir = TestDir::new("batch_convert_all");
        let config = config_in(dir.path());
        let hair = write_lut(&config, "hair.png");
        let frames: Vec<_> = ["idle", "run", "stab"]
            .into_iter()
            .map(|name| {
                let frame = palette_frame(&hair, 10, 10);
                write_frame(&config, name, "hair.png", &frame);
                (name, frame)
            })
            .collect();
        // plain files in the root are not animations
        fs::write(config.animations_dir.join("README"), "notes").unwrap();

        let report = Converter::new(config.clone())
            .convert(&"all".parse().unwrap())
            .unwrap();

        assert_eq!(
            report,
            BatchReport {
                animations: 3,
                frames: 3,
                luts: 1
            }
        );
        for (name, frame) in frames {
            let output = config.output_dir.join(name).join("hair.png");
            assert_converted(&config, &hair, &frame, &output);
        }
    }

    #[test]
    fn test_missing_color_aborts_without_output() {
        let dir = TestDir::new("batch_missing_color");
        let config = config_in(dir.path());
        let body = write_lut(&config, "body.png");
        let mut frame = palette_frame(&body, 6, 6);
        frame.set_pixel(4, 2, Color::from_u8(1, 2, 3, 0));
        write_frame(&config, "walk", "body.png", &frame);

        let err = Converter::new(config.clone())
            .convert(&InputSelector::Animation("walk".into()))
            .unwrap_err();

        match err {
            UvMapperError::ColorNotFound { color, x, y } => {
                assert_eq!(color, Color::from_u8(1, 2, 3, 0));
                assert_eq!((x, y), (4, 2));
            }
            other => panic!("expected ColorNotFound, got {:?}", other),
        }
        assert!(!config.output_dir.join("walk").join("body.png").exists());
    }

    #[test]
    fn test_unknown_part_aborts_batch() {
        let dir = TestDir::new("batch_unknown_part");
        let config = config_in(dir.path());
        let body = write_lut(&config, "body.png");
        write_frame(&config, "walk", "body.png", &palette_frame(&body, 4, 4));
        write_frame(&config, "walk", "sword.png", &palette_frame(&body, 4, 4));

        let err = Converter::new(config.clone())
            .convert(&InputSelector::Animation("walk".into()))
            .unwrap_err();

        assert!(matches!(err, UvMapperError::InvalidInput(_)));
        assert!(!config.output_dir.join("walk").exists());
    }

    #[test]
    fn test_non_png_file_aborts_batch() {
        let dir = TestDir::new("batch_non_png");
        let config = config_in(dir.path());
        let body = write_lut(&config, "body.png");
        write_frame(&config, "walk", "body.png", &palette_frame(&body, 4, 4));
        fs::write(config.animations_dir.join("walk").join("body.txt"), "x").unwrap();

        let err = Converter::new(config)
            .convert(&InputSelector::Animation("walk".into()))
            .unwrap_err();

        assert!(matches!(err, UvMapperError::InvalidInput(_)));
    }

    #[test]
    fn test_second_frame_for_part_aborts_batch() {
        let dir = TestDir::new("batch_duplicate_part");
        let config = config_in(dir.path());
        let body = write_lut(&config, "body.png");
        write_frame(&config, "walk", "body.png", &palette_frame(&body, 4, 4));
        write_frame(&config, "walk", "body.PNG", &palette_frame(&body, 8, 8));

        let err = Converter::new(config.clone())
            .convert(&InputSelector::Animation("walk".into()))
            .unwrap_err();

        assert!(matches!(err, UvMapperError::InvalidInput(_)));
        assert!(!config.output_dir.join("walk").exists());
    }

    #[test]
    fn test_missing_lut_aborts_batch() {
        let dir = TestDir::new("batch_missing_lut");
        let config = config_in(dir.path());
        let body = write_lut(&config, "body.png");
        write_frame(&config, "walk", "cape.png", &palette_frame(&body, 4, 4));

        let err = Converter::new(config)
            .convert(&InputSelector::Animation("walk".into()))
            .unwrap_err();

        assert!(matches!(err, UvMapperError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_animation_directory() {
        let dir = TestDir::new("batch_missing_animation");
        let config = config_in(dir.path());

        let err = Converter::new(config)
            .convert(&InputSelector::Animation("nope".into()))
            .unwrap_err();

        assert!(matches!(err, UvMapperError::InvalidInput(_)));
    }

    #[test]
    fn test_output_dir_outside_animations_root() {
        let dir = TestDir::new("batch_outside_root");
        let config = config_in(dir.path());
        let converter = Converter::new(config.clone());

        assert_eq!(
            converter
                .output_dir_for(&config.animations_dir.join("a").join("b"))
                .unwrap(),
            config.output_dir.join("a").join("b")
        );
        let err = converter.output_dir_for(dir.path()).unwrap_err();
        assert!(matches!(err, UvMapperError::InvalidInput(_)));
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("all".parse::<InputSelector>().unwrap(), InputSelector::All);
        assert_eq!(
            "stab".parse::<InputSelector>().unwrap(),
            InputSelector::Animation("stab".into())
        );
        assert!("".parse::<InputSelector>().is_err());
    }

    #[test]
    fn test_build_luts_then_convert() {
        let dir = TestDir::new("batch_build_luts");
        let config = ConverterConfig {
            lut_width: 16,
            lut_height: 16,
            ..config_in(dir.path())
        };
        encode(&identity_template(16, 16), &config.template_path).unwrap();
        fs::create_dir_all(&config.clothes_dir).unwrap();
        let (texture, _) = palette_lut(16, 16);
        encode(&texture, config.clothes_dir.join("cape.png")).unwrap();
        fs::write(config.clothes_dir.join("notes.txt"), "skip me").unwrap();

        let report = build_luts(&config).unwrap();
        assert_eq!(report.luts, 1);
        assert_eq!(decode(config.luts_dir.join("cape.png")).unwrap(), texture);

        // the texture itself is a valid frame: every pixel lands on its own cell
        write_frame(&config, "fly", "cape.png", &texture);
        Converter::new(config.clone())
            .convert(&InputSelector::Animation("fly".into()))
            .unwrap();
        let converted = decode(config.output_dir.join("fly").join("cape.png")).unwrap();
        assert_eq!(converted, identity_template(16, 16));
    }
}
