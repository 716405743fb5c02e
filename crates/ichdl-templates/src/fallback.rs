//! Placeholder output for parts with no matching template.

use crate::context::RenderContext;
use crate::error::Result;
use crate::language::Language;
use crate::renderer::HdlRenderer;

const VERILOG_STUB: &str = include_str!("../templates/fallback/stub.vtpl");
const VHDL_STUB: &str = include_str!("../templates/fallback/stub.vhdltpl");

/// Stub template text for a language.
pub fn stub_source(language: Language) -> &'static str {
    match language {
        Language::Verilog => VERILOG_STUB,
        Language::Vhdl => VHDL_STUB,
    }
}

/// Render a module with the record's ports and every output tied low.
pub fn render_stub(renderer: &HdlRenderer, ctx: &RenderContext) -> Result<String> {
    let name = format!("<fallback>{}", ctx.language.template_ext());
    renderer.render(&name, stub_source(ctx.language), ctx)
}
