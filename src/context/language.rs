/// Map a file path to the language tag used on its code fence.
/// Well-known extensionless files are matched by basename first.
pub fn classify(path: &str) -> Option<&'static str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    if let Some(lang) = by_basename(name) {
        return Some(lang);
    }
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() {
        // dotfile such as `.env`; the whole name is not an extension
        return None;
    }
    by_extension(&ext.to_ascii_lowercase())
}

fn by_basename(name: &str) -> Option<&'static str> {
    let lang = match name {
        "Dockerfile" | "Containerfile" => "dockerfile",
        "Makefile" | "makefile" | "GNUmakefile" => "makefile",
        "CMakeLists.txt" => "cmake",
        "Gemfile" | "Rakefile" | "Podfile" | "Vagrantfile" => "ruby",
        "Jenkinsfile" => "groovy",
        ".bashrc" | ".bash_profile" | ".profile" | ".zshrc" => "bash",
        _ if name.starts_with("Dockerfile.") => "dockerfile",
        _ => return None,
    };
    Some(lang)
}

fn by_extension(ext: &str) -> Option<&'static str> {
    let lang = match ext {
        "rs" => "rust",
        "py" | "pyi" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "jsx",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "tsx",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "scala" => "scala",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => "cpp",
        "cs" => "csharp",
        "fs" | "fsx" => "fsharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "m" | "mm" => "objectivec",
        "dart" => "dart",
        "lua" => "lua",
        "pl" | "pm" => "perl",
        "r" => "r",
        "jl" => "julia",
        "ex" | "exs" => "elixir",
        "erl" | "hrl" => "erlang",
        "hs" => "haskell",
        "ml" | "mli" => "ocaml",
        "clj" | "cljs" | "edn" => "clojure",
        "zig" => "zig",
        "nim" => "nim",
        "vue" => "vue",
        "svelte" => "svelte",
        "sql" => "sql",
        "sh" | "bash" | "zsh" => "bash",
        "fish" => "fish",
        "ps1" | "psm1" => "powershell",
        "bat" | "cmd" => "batch",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "json" | "jsonc" => "json",
        "xml" | "xsd" | "svg" => "xml",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "less" => "less",
        "md" | "markdown" => "markdown",
        "rst" => "rst",
        "tex" => "latex",
        "graphql" | "gql" => "graphql",
        "proto" => "protobuf",
        "tf" | "hcl" => "hcl",
        "ini" | "cfg" => "ini",
        "gradle" => "groovy",
        "dockerfile" => "dockerfile",
        _ => return None,
    };
    Some(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_extensions() {
        assert_eq!(classify("a.py"), Some("python"));
        assert_eq!(classify("src/index.ts"), Some("typescript"));
        assert_eq!(classify("src/lib.rs"), Some("rust"));
        assert_eq!(classify("web/App.TSX"), Some("tsx"));
    }

    #[test]
    fn matches_basenames() {
        assert_eq!(classify("Dockerfile"), Some("dockerfile"));
        assert_eq!(classify("deploy/Dockerfile.prod"), Some("dockerfile"));
        assert_eq!(classify("Makefile"), Some("makefile"));
    }

    #[test]
    fn unknown_is_none() {
        assert_eq!(classify("notes.xyz"), None);
        assert_eq!(classify("LICENSE"), None);
        assert_eq!(classify(".env"), None);
    }
}
