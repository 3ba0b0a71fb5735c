use formkit_config::FormkitConfig;
use formkit_server::pages::form_page;

use crate::cli::RenderArgs;
use crate::commands::shared::{apply_form_args, load_form};

/// Handle `formkit render`.
pub fn handle(args: &RenderArgs, config: FormkitConfig) -> anyhow::Result<()> {
    let markup = markup(args, config)?;
    if args.page {
        print!("{markup}");
    } else {
        println!("{markup}");
    }
    Ok(())
}

/// The form fields, or with `--page` the whole HTML document.
fn markup(args: &RenderArgs, mut config: FormkitConfig) -> anyhow::Result<String> {
    apply_form_args(&mut config, &args.form);
    let form = load_form(&config)?;

    let fragment = form.render(config.form.list_encoding);
    Ok(if args.page {
        form_page(&config.form.title, &fragment)
    } else {
        fragment
    })
}

#[cfg(test)]
mod tests {
    use formkit_core::ListEncoding;

    use super::*;
    use crate::cli::FormArgs;

    fn args(dir: &std::path::Path, page: bool, list_encoding: Option<ListEncoding>) -> RenderArgs {
        let schema = dir.join("form.json");
        let types = dir.join("form-type.json");
        std::fs::write(&schema, r#"{"tags": ["a", "b"]}"#).expect("write schema");
        std::fs::write(&types, r#"{"tags": "list[str]"}"#).expect("write types");
        RenderArgs {
            form: FormArgs {
                schema: Some(schema),
                types: Some(types),
                list_encoding,
            },
            page,
        }
    }

    #[test]
    fn fragment_uses_configured_encoding() {
        let dir = tempfile::tempdir().expect("tempdir");

        let rows = markup(&args(dir.path(), false, None), FormkitConfig::default())
            .expect("renders");
        assert!(rows.contains(r#"name="tags.2" value="""#));
        assert!(!rows.contains("<html"));

        let comma = markup(
            &args(dir.path(), false, Some(ListEncoding::Comma)),
            FormkitConfig::default(),
        )
        .expect("renders");
        assert!(comma.contains(r#"name="tags" value="a, b""#));
    }

    #[test]
    fn page_wraps_fragment_with_title() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = FormkitConfig::default();
        config.form.title = "Tags".into();

        let page = markup(&args(dir.path(), true, None), config).expect("renders");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Tags</title>"));
        assert!(page.contains(r#"name="tags.0""#));
    }

    #[test]
    fn missing_types_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut args = args(dir.path(), false, None);
        args.form.types = Some(dir.path().join("nope.json"));
        assert!(handle(&args, FormkitConfig::default()).is_err());
    }
}
