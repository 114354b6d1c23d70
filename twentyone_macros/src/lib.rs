use proc_macro::TokenStream as TokenStream1;
use quote::ToTokens;
use syn;

/// This macro is added before a transition method of the `Table` struct in
/// the impl block. Use this macro to first check that the round is currently
/// in exactly the phase named in the attribute.
///
/// For example, `#[allowed_phase(PlayerTurns)]` makes a method first check
/// whether `self.phase` is `RoundPhase::PlayerTurns`. If not, the method
/// returns a `SimulationError::StateViolation` instead of touching the table.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let mut ast: syn::ImplItemFn = syn::parse(item).unwrap();
    let phase = attr.to_string();
    let function_name = ast.sig.ident.to_string();
    let err_msg = format!("{} is only allowed in {} phase", function_name, phase);
    let code = format!(
        r#"
    if self.phase != RoundPhase::{} {{
        return Err(crate::SimulationError::StateViolation(String::from("{}")));
    }}
"#,
        phase, err_msg
    );
    let early_return: TokenStream1 = code.parse().unwrap();
    let early_return: syn::Stmt = syn::parse(early_return).unwrap();
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}
