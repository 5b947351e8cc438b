pub mod availability;
pub mod day_schedule;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        // Test that all route module constants are accessible
        assert_eq!(
            super::availability::CHECK_AVAILABILITY,
            "check_availability"
        );
        assert_eq!(super::day_schedule::GET_DAY_CONFLICTS, "get_day_conflicts");
    }
}
