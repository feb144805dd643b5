mod format_output_paths;
