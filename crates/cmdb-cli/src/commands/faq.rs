use crate::render;
use anyhow::{Result, bail};
use cmdb_application::DashboardState;

pub async fn run(
    state: &DashboardState,
    open: Option<usize>,
    expand_all: bool,
    styled: bool,
) -> Result<()> {
    let mut list = state.faq_service().load_list().await?;

    if let Some(n) = open {
        list.toggle(open_index(n, list.len())?);
    }

    print!("{}", render::faq(&list, expand_all, styled));
    Ok(())
}

/// Maps the 1-based `--open` value onto a list index.
fn open_index(n: usize, len: usize) -> Result<usize> {
    if len == 0 {
        bail!("--open {n}: there are no FAQ entries");
    }
    if n == 0 || n > len {
        bail!("--open expects a number between 1 and {len}");
    }
    Ok(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_index_is_one_based() {
        assert_eq!(open_index(1, 3).unwrap(), 0);
        assert_eq!(open_index(3, 3).unwrap(), 2);
    }

    #[test]
    fn test_open_index_out_of_range() {
        let err = open_index(4, 3).unwrap_err();
        assert_eq!(err.to_string(), "--open expects a number between 1 and 3");
        assert!(open_index(0, 3).is_err());
    }

    #[test]
    fn test_open_index_on_empty_faq() {
        let err = open_index(1, 0).unwrap_err();
        assert_eq!(err.to_string(), "--open 1: there are no FAQ entries");
    }
}
