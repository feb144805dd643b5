//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::path::{Path, PathBuf};

    use html_i18n_extractor::core::{format_output_paths, ExtractorOptions};

    #[test]
    fn next_to_input() {
        let paths = format_output_paths(
            Path::new("/home/username/site/views/about.html"),
            &ExtractorOptions::default(),
        );

        assert_eq!(
            paths.markup,
            PathBuf::from("/home/username/site/views/about_translation.html")
        );
        assert_eq!(
            paths.dictionary,
            PathBuf::from("/home/username/site/views/about_translation.json")
        );
    }

    #[test]
    fn template_extension_becomes_html() {
        let paths = format_output_paths(Path::new("views/index.ejs"), &Default::default());

        assert_eq!(paths.markup, PathBuf::from("views/index_translation.html"));
    }

    #[test]
    fn only_last_extension_is_dropped() {
        let paths = format_output_paths(Path::new("mail.en.html"), &Default::default());

        assert_eq!(paths.markup, PathBuf::from("mail.en_translation.html"));
        assert_eq!(paths.dictionary, PathBuf::from("mail.en_translation.json"));
    }

    #[test]
    fn no_extension() {
        let paths = format_output_paths(Path::new("../README"), &Default::default());

        assert_eq!(paths.markup, PathBuf::from("../README_translation.html"));
    }

    #[test]
    fn output_dir() {
        let options = ExtractorOptions {
            output_dir: Some(PathBuf::from("/tmp/i18n")),
            ..Default::default()
        };
        let paths = format_output_paths(Path::new("views/index.html"), &options);

        assert_eq!(paths.markup, PathBuf::from("/tmp/i18n/index_translation.html"));
        assert_eq!(paths.dictionary, PathBuf::from("/tmp/i18n/index_translation.json"));
    }

    #[test]
    fn replace_source() {
        let options = ExtractorOptions {
            replace_source: true,
            ..Default::default()
        };
        let paths = format_output_paths(Path::new("views/index.html"), &options);

        assert_eq!(paths.markup, PathBuf::from("views/index.html"));
        assert_eq!(paths.dictionary, PathBuf::from("views/index_translation.json"));
    }
}
