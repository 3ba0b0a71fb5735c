use formkit_config::FormkitConfig;

use crate::cli::CheckArgs;
use crate::commands::shared::{apply_form_args, load_form};

/// Handle `formkit check`.
pub fn handle(args: &CheckArgs, config: FormkitConfig) -> anyhow::Result<()> {
    println!("{}", report(args, config)?);
    Ok(())
}

fn report(args: &CheckArgs, mut config: FormkitConfig) -> anyhow::Result<String> {
    apply_form_args(&mut config, &args.form);
    let summary = load_form(&config)?.summary();

    Ok(format!(
        "{}: {} fields ({} lists) in {} groups, nested {} deep",
        config.form.schema_path.display(),
        summary.fields,
        summary.lists,
        summary.groups,
        summary.depth
    ))
}
