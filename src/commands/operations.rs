use crate::core::{output::print_section_header, provider::Provider};

/// List every operation the provider has a worker for
pub fn execute_list_operations(provider: &Provider) {
    print_section_header(&format!("{} operations", provider.name()));
    for name in provider.supported_operations() {
        println!("  {name}");
    }
    println!();
}
