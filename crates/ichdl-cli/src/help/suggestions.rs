//! "Did you mean" hints and follow-up advice.

use ichdl_templates::{Language, TemplateKind};

/// Shown when an unknown part number has no close match.
pub const LIST_HINT: &str = "run 'ic-hdl-gen list' to see the known part numbers";

/// `did you mean '7400'?` for one candidate, a list for several, nothing for none.
pub fn did_you_mean(suggestions: &[String]) -> Option<String> {
    match suggestions {
        [] => None,
        [only] => Some(format!("did you mean '{only}'?")),
        many => {
            let quoted: Vec<_> = many.iter().map(|s| format!("'{s}'")).collect();
            Some(format!("did you mean one of {}?", quoted.join(", ")))
        }
    }
}

/// Advice for a template that could not be resolved.
pub fn template_hint(kind: TemplateKind, language: Language) -> String {
    match kind {
        TemplateKind::Module => format!(
            "add {}/{}/generic{} or pass --fallback to emit a stub module; \
             'ic-hdl-gen doctor' lists mismatched template names",
            kind.root_dir(),
            language.dir_name(),
            language.template_ext()
        ),
        TemplateKind::Testbench => format!(
            "add {}/{}/generic_tb{}",
            kind.root_dir(),
            language.dir_name(),
            language.template_ext()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_you_mean() {
        assert_eq!(did_you_mean(&[]), None);
        assert_eq!(
            did_you_mean(&["7400".to_string()]).as_deref(),
            Some("did you mean '7400'?")
        );
        assert_eq!(
            did_you_mean(&["7400".to_string(), "7404".to_string()]).as_deref(),
            Some("did you mean one of '7400', '7404'?")
        );
    }

    #[test]
    fn test_template_hint() {
        let hint = template_hint(TemplateKind::Module, Language::Vhdl);
        assert!(hint.contains("hdl_templates/vhdl/generic.vhdltpl"));
        assert!(hint.contains("--fallback"));

        let hint = template_hint(TemplateKind::Testbench, Language::Verilog);
        assert_eq!(hint, "add testbench_templates/verilog/generic_tb.vtpl");
    }
}
