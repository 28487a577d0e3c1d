//! End-to-end merge scenarios using the real C# parser.

use std::{fs, path::Path};

use plugmerge_codegen::{
    FileCreator, MergeError, MergeHandler,
    classify::{ClassifiedFile, ClassifyOptions, classify},
    creator::VERSION,
    pipeline::ScannedFile,
};
use plugmerge_config::{CreatorMode, PluginMergeConfig, PreprocessorDirective};
use plugmerge_syntax::{CSharpParser, SourceParser};
use tempfile::TempDir;

const PLUGIN: &str = r#"using System;
using System.Collections.Generic;
using Oxide.Plugins;

namespace Oxide.Plugins
{
    [Info("My Plugin", "Author", "1.0.0")]
    [Description("A merged plugin")]
    public partial class MyPlugin : RustPlugin
    {
        private void Init()
        {
            Puts("Init");
        }
    }
}
"#;

const CONFIG: &str = r#"//Define:FileOrder=2000
using System;
using System.Linq;

namespace Oxide.Plugins
{
    public class PluginConfig
    {
        public int Radius = 5;
    }
}
"#;

const FRAMEWORK: &str = r#"//Define:Framework
//[Info("Lib", "Someone", "0.1.0")]
//[Description("Shared helpers")]
namespace Oxide.Plugins
{
    public partial class Lib : RustPlugin
    {
        private int _calls;
    }
}
"#;

const EXTENSION: &str = r#"namespace Oxide.Plugins
{
    //Define:ExtensionMethods
    public static class ConfigExt
    {
        public static int Double(this PluginConfig config) => config.Radius * 2;
        public static bool Valid(this PluginConfig config) => config.Radius > 0;
    }
}
"#;

fn config() -> PluginMergeConfig {
    let mut config = PluginMergeConfig::default();
    config.merge.plugin_name = "MyPlugin".to_string();
    config.merge.ignore_paths.clear();
    config.merge.ignore_files.clear();
    config
}

fn classify_sources(sources: &[(&str, &str)], config: &PluginMergeConfig) -> Vec<ClassifiedFile> {
    let options = ClassifyOptions::from_config(config);
    let mut parser = CSharpParser::new().unwrap();
    let mut files: Vec<ClassifiedFile> = sources
        .iter()
        .enumerate()
        .map(|(index, (path, text))| {
            let parsed = parser.parse(text).unwrap();
            let scanned = ScannedFile::new(format!("/src/{path}"), "/src");
            classify(&scanned, index, text.to_string(), &parsed, &options)
        })
        .filter(|file| !file.is_excluded())
        .collect();
    files.sort_by_key(|file| file.order);
    files
}

fn merge(sources: &[(&str, &str)], config: &PluginMergeConfig) -> String {
    let mut files = classify_sources(sources, config);
    FileCreator::new(config).create(&mut files).unwrap()
}

fn write_sources(root: &Path, sources: &[(&str, &str)]) {
    for (path, text) in sources {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }
}

fn position(code: &str, needle: &str) -> usize {
    code.find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in:\n{code}"))
}

#[test]
fn test_plugin_mode_end_to_end() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_sources(root, &[("Plugin.cs", PLUGIN), ("Data/Config.cs", CONFIG)]);

    let mut config = config();
    config.merge.input_paths = vec![root.to_path_buf()];
    config.merge.output_paths = vec![root.join("build")];

    let output = MergeHandler::new(config).merge().unwrap();
    assert_eq!(output.plugin_name, "MyPlugin");
    assert_eq!(output.destinations, vec![root.join("build").join("MyPlugin.cs")]);
    assert_eq!(output.file_count, 2);

    let expected = format!(
        r#"#define DEBUG
using System;
using System.Collections.Generic;
using System.Linq;

//MyPlugin created with plugmerge v({VERSION})
namespace Oxide.Plugins
{{
    [Info("My Plugin", "Author", "1.0.0")]
    [Description("A merged plugin")]
    public partial class MyPlugin : RustPlugin
    {{
        #region Plugin.cs
        private void Init()
        {{
            Puts("Init");
        }}
        #endregion

        #region Data/Config.cs
        public class PluginConfig
        {{
            public int Radius = 5;
        }}
        #endregion

    }}

}}
"#
    );
    assert_eq!(output.code, expected);
}

#[test]
fn test_run_writes_every_destination() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_sources(root, &[("src/Plugin.cs", PLUGIN)]);

    let mut config = config();
    config.merge.input_paths = vec![root.join("src")];
    config.merge.output_paths = vec![root.join("out/a"), root.join("out/b")];

    let output = MergeHandler::new(config).run().unwrap();
    for destination in &output.destinations {
        assert_eq!(fs::read_to_string(destination).unwrap(), output.code);
    }
    assert!(root.join("out/b/MyPlugin.cs").exists());
}

#[test]
fn test_output_directory_is_not_merged_again() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_sources(root, &[("Plugin.cs", PLUGIN)]);

    let mut config = config();
    config.merge.input_paths = vec![root.to_path_buf()];
    config.merge.output_paths = vec![root.join("build")];

    let handler = MergeHandler::new(config);
    let first = handler.run().unwrap();
    let second = handler.run().unwrap();
    assert_eq!(first.code, second.code);
    assert_eq!(second.file_count, 1);
}

#[test]
fn test_order_is_stable() {
    let a = "//Define:FileOrder=5\nnamespace Oxide.Plugins\n{\n    class A { }\n}\n";
    let b = "namespace Oxide.Plugins\n{\n    class B { }\n}\n";
    let c = "//Define:FileOrder=5\nnamespace Oxide.Plugins\n{\n    class C { }\n}\n";
    let code = merge(
        &[("B.cs", b), ("Plugin.cs", PLUGIN), ("C.cs", c), ("A.cs", a)],
        &config(),
    );

    let positions = [
        position(&code, "class C"),
        position(&code, "class A"),
        position(&code, "class B"),
        position(&code, "Puts(\"Init\")"),
    ];
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{code}");
}

#[test]
fn test_imports_are_deduplicated() {
    let code = merge(&[("Plugin.cs", PLUGIN), ("Config.cs", CONFIG)], &config());
    assert_eq!(code.matches("using System;").count(), 1);
    assert!(!code.contains("using Oxide.Plugins;"));
}

#[test]
fn test_ignored_namespaces_dropped() {
    let mut config = config();
    config.merge.ignore_namespaces = vec!["System.Collections".to_string()];
    let code = merge(&[("Plugin.cs", PLUGIN)], &config);
    assert!(!code.contains("System.Collections.Generic"));
    assert!(code.contains("using System;"));
}

#[test]
fn test_namespace_scoped_imports_block() {
    let scoped = "using System;\nnamespace Oxide.Plugins\n{\n    using UnityEngine;\n    using System;\n    class Marker { }\n}\n";
    let code = merge(&[("Plugin.cs", PLUGIN), ("Marker.cs", scoped)], &config());
    let system = position(&code, "using System;\n");
    let unity = position(&code, "using UnityEngine;\n");
    let header = position(&code, "//MyPlugin created");
    assert!(system < unity && unity < header);
    assert_eq!(code.matches("using System;").count(), 1);
}

#[test]
fn test_comments_dropped_when_disabled() {
    let commented = r#"namespace Oxide.Plugins
{
    public class Helper
    {
        // explains things
        /*
         * block
         */
        public int Value;
    }
}
"#;
    let mut config = config();
    config.merge.code_style.keep_comments = false;
    let code = merge(&[("Plugin.cs", PLUGIN), ("Helper.cs", commented)], &config);
    assert!(!code.contains("explains"));
    assert!(!code.contains("block"));
    assert!(code.contains("public int Value;"));
}

#[test]
fn test_regions_disabled() {
    let mut config = config();
    config.merge.code_style.write_file_region = false;
    let code = merge(&[("Plugin.cs", PLUGIN)], &config);
    assert!(!code.contains("#region"));
    assert!(!code.contains("#endregion"));
}

#[test]
fn test_nested_blocks_indent_by_level() {
    let mut config = config();
    config.merge.code_style.indent_amount = 2;
    let code = merge(&[("Plugin.cs", PLUGIN)], &config);
    assert!(code.contains("\n    private void Init()\n    {\n      Puts(\"Init\");\n    }\n"));
}

#[test]
fn test_self_reference_stripped() {
    let helper = "namespace Oxide.Plugins\n{\n    class Helper\n    {\n        int Get() => MyPlugin.Instance.Count;\n    }\n}\n";
    let code = merge(&[("Plugin.cs", PLUGIN), ("Helper.cs", helper)], &config());
    assert!(code.contains("int Get() => Instance.Count;"));
}

#[test]
fn test_framework_blocks_follow_plugin_class() {
    let code = merge(&[("Plugin.cs", PLUGIN), ("Lib.cs", FRAMEWORK)], &config());

    let main_class = position(&code, "public partial class MyPlugin : RustPlugin");
    let info = position(&code, "    //[Info(\"Lib\", \"Someone\", \"0.1.0\")]\n    //[Description(\"Shared helpers\")]\n");
    let region = position(&code, "#region Merged Framework Lib");
    let block = position(&code, "    public partial class MyPlugin\n    {\n        public partial class Lib : RustPlugin");
    assert!(main_class < info && info < region && region < block);
    assert!(code.contains("[Info(\"My Plugin\", \"Author\", \"1.0.0\")]\n"));
    assert!(!code.contains("//[Info(\"My Plugin\""));
}

#[test]
fn test_plain_framework_class_gets_own_block() {
    let plain = "//Define:Framework\nnamespace Oxide.Plugins\n{\n    public class Bar\n    {\n        public int Count;\n    }\n}\n";
    let code = merge(&[("Plugin.cs", PLUGIN), ("Bar.cs", plain)], &config());

    let main_close = position(&code, "        #endregion\n\n    }\n\n");
    let block = position(
        &code,
        "    #region Merged Framework Bar.cs\n    public partial class MyPlugin\n    {\n        public class Bar\n        {\n            public int Count;\n        }\n    }\n    #endregion\n",
    );
    assert!(main_close < block, "{code}");
    assert!(!code.contains("//[Info("));
    assert!(!code.contains("//[Description("));
    assert_eq!(code.matches("public partial class MyPlugin").count(), 2);
}

#[test]
fn test_framework_mode_comments_attributes() {
    let mut config = config();
    config.merge.creator_mode = CreatorMode::Framework;
    let code = merge(&[("Plugin.cs", PLUGIN)], &config);
    assert!(code.contains("    //[Info(\"My Plugin\", \"Author\", \"1.0.0\")]\n"));
    assert!(code.contains("    //[Description(\"A merged plugin\")]\n"));
    assert!(!code.contains("//Define:Framework"));
}

#[test]
fn test_merge_framework_mode() {
    let mut config = config();
    config.merge.creator_mode = CreatorMode::MergeFramework;
    let code = merge(&[("Plugin.cs", PLUGIN), ("Data/Config.cs", CONFIG)], &config);

    let namespace = position(&code, "namespace Oxide.Plugins\n{\n    //Define:Framework\n");
    let class_close = position(&code, "    }\n\n    #region Data/Config.cs\n    public class PluginConfig");
    assert!(namespace < class_close);
    assert!(code.contains("    //[Info(\"My Plugin\""));
}

#[test]
fn test_excluded_file_contributes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let excluded = "//Define:ExcludeFile\n//Requires: Secret\n#define HIDDEN\nusing Hidden.Namespace;\nnamespace Oxide.Plugins\n{\n    class Hidden { }\n}\n";
    write_sources(root, &[("Plugin.cs", PLUGIN), ("Hidden.cs", excluded)]);

    let mut config = config();
    config.merge.input_paths = vec![root.to_path_buf()];
    config.merge.output_paths = vec![root.join("build")];

    let output = MergeHandler::new(config).merge().unwrap();
    assert_eq!(output.file_count, 1);
    assert!(!output.code.contains("Hidden"));
    assert!(!output.code.contains("HIDDEN"));
}

#[test]
fn test_extension_namespace_and_aliases() {
    let code = merge(
        &[
            ("Plugin.cs", PLUGIN),
            ("Config.cs", CONFIG),
            ("ConfigExt.cs", EXTENSION),
        ],
        &config(),
    );

    assert!(code.contains("using Oxide.Plugins.MyPluginExtensions;\n"));
    let alias = "    using PluginConfig = Oxide.Plugins.MyPlugin.PluginConfig;\n";
    assert_eq!(code.matches(alias).count(), 1);

    let namespace_close = position(&code, "\n}\n\nnamespace Oxide.Plugins.MyPluginExtensions\n{\n");
    let ext = position(&code, "    public static class ConfigExt\n    {\n");
    assert!(namespace_close < ext);
    assert!(!code.contains("//Define:ExtensionMethods"));
    assert!(code.ends_with("        public static bool Valid(this PluginConfig config) => config.Radius > 0;\n    }\n}\n"));
}

#[test]
fn test_extension_marker_written_in_framework_modes() {
    let mut config = config();
    config.merge.creator_mode = CreatorMode::Framework;
    let code = merge(&[("Plugin.cs", PLUGIN), ("ConfigExt.cs", EXTENSION)], &config);
    assert!(code.contains("\n\n    //Define:ExtensionMethods\n    public static class ConfigExt\n"));
}

#[test]
fn test_preprocessor_guard_wraps_output() {
    let mut config = config();
    config.merge.preprocessor_directives = vec![PreprocessorDirective {
        directive: "RUST".to_string(),
        message: "This plugin requires RUST".to_string(),
        enabled: true,
    }];
    config.merge.requires = vec!["ImageLibrary".to_string()];
    let code = merge(&[("Plugin.cs", PLUGIN)], &config);

    assert!(code.starts_with("//Requires: ImageLibrary\n#if (RUST)\n#define DEBUG\n"));
    assert!(code.ends_with("}\n#else\n#error This plugin requires RUST\n#endif\n"));
}

#[test]
fn test_plugin_class_renamed_to_plugin_name() {
    let foo = r#"namespace Oxide.Plugins
{
    [Info("MyPlugin", "Dev", "1.0.0")]
    [Description("desc")]
    public class Foo : RustPlugin
    {
        private void Loaded()
        {
            Puts("Foo");
        }
    }
}
"#;
    let ext = r#"namespace Oxide.Plugins
{
    //Define:ExtensionMethods
    public static class FooExt
    {
        public static void Hello(this Foo plugin) => plugin.Puts("hi");
    }
}
"#;
    let code = merge(&[("Foo.cs", foo), ("FooExt.cs", ext)], &config());

    let info = position(&code, "    [Info(\"MyPlugin\", \"Dev\", \"1.0.0\")]\n    [Description(\"desc\")]\n");
    let class = position(&code, "    public partial class MyPlugin : RustPlugin\n");
    let body = position(&code, "        #region Foo.cs\n        private void Loaded()\n");
    assert!(info < class && class < body, "{code}");
    assert!(code.contains("            Puts(\"Foo\");\n"));
    assert!(!code.contains("class Foo "));
    assert!(!code.contains("class Foo\n"));
    assert!(!code.contains("using Foo ="));
}

#[test]
fn test_attribute_expressions_pass_through() {
    let plugin = r#"namespace Oxide.Plugins
{
    [Info("MyPlugin", "Dev", Version)]
    [Description(@"C:\data\x")]
    public class MyPlugin : RustPlugin
    {
        private const string Version = "1.0.0";
    }
}
"#;
    let code = merge(&[("Plugin.cs", plugin)], &config());
    assert!(code.contains("    [Info(\"MyPlugin\", \"Dev\", Version)]\n"), "{code}");
    assert!(code.contains("    [Description(@\"C:\\data\\x\")]\n"), "{code}");

    let mut config = config();
    config.merge.plugin_name.clear();
    let mut files = classify_sources(&[("Plugin.cs", plugin)], &config);
    let mut creator = FileCreator::new(&config);
    creator.create(&mut files).unwrap();
    assert_eq!(creator.plugin_name(), "MyPlugin");
}

#[test]
fn test_plugin_without_attributes_writes_none() {
    let bare = "namespace Oxide.Plugins\n{\n    public class MyPlugin : CovalencePlugin\n    {\n        int x;\n    }\n}\n";
    let code = merge(&[("Plugin.cs", bare)], &config());
    assert!(code.contains("{\n    public partial class MyPlugin : CovalencePlugin\n"), "{code}");
    assert!(!code.contains("[Info("));
    assert!(!code.contains("[Description("));
}

#[test]
fn test_plugin_name_derived_when_empty() {
    let mut config = config();
    config.merge.plugin_name.clear();
    let mut files = classify_sources(&[("Plugin.cs", PLUGIN)], &config);
    let mut creator = FileCreator::new(&config);
    let code = creator.create(&mut files).unwrap();
    assert_eq!(creator.plugin_name(), "MyPlugin");
    assert!(code.contains("public partial class MyPlugin : RustPlugin"));
}

#[test]
fn test_no_plugin_found() {
    let config = config();
    let mut files = classify_sources(&[("Config.cs", CONFIG)], &config);
    let err = FileCreator::new(&config).create(&mut files).unwrap_err();
    assert!(matches!(err, MergeError::NoPluginFound));
}

#[test]
fn test_no_plugin_found_through_handler() {
    let temp = TempDir::new().unwrap();
    write_sources(temp.path(), &[("Config.cs", CONFIG)]);

    let mut config = config();
    config.merge.input_paths = vec![temp.path().to_path_buf()];
    config.merge.output_paths = vec![temp.path().join("build")];

    let err = MergeHandler::new(config).run().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MergeError>(),
        Some(MergeError::NoPluginFound)
    ));
    assert!(!temp.path().join("build").exists());
}

#[test]
fn test_first_plugin_wins() {
    let second = PLUGIN
        .replace("MyPlugin : RustPlugin", "Other : RustPlugin")
        .replace("Puts(\"Init\")", "Puts(\"Other\")");
    let code = merge(&[("Plugin.cs", PLUGIN), ("Other.cs", &second)], &config());
    assert!(code.contains("public partial class MyPlugin : RustPlugin\n"));
    assert!(code.contains("#region Other.cs\n        [Info("));
}

#[test]
fn test_plugin_file_is_first_in_scan_order() {
    let later = format!(
        "//Define:FileOrder=1\n{}",
        PLUGIN.replace("MyPlugin : RustPlugin", "Other : RustPlugin")
    );
    let code = merge(&[("A.cs", PLUGIN), ("B.cs", &later)], &config());

    assert!(position(&code, "#region B.cs") < position(&code, "#region A.cs"));
    assert!(code.contains("#region A.cs\n        private void Init()"));
    assert!(code.contains("#region B.cs\n        [Info("));
}

#[test]
fn test_comment_only_file_has_no_region() {
    let notes = "// planned: admin commands\nnamespace Oxide.Plugins\n{\n    // nothing here yet\n}\n";
    let mut config = config();
    config.merge.code_style.keep_comments = false;
    let code = merge(&[("Plugin.cs", PLUGIN), ("Notes.cs", notes)], &config);
    assert!(!code.contains("Notes.cs"));
    assert!(!code.contains("nothing here yet"));
}
