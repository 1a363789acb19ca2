mod calendar_handle;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - fetch_mock: Retry, timeout and API behaviour against a scripted transport
// - calendar_handle: The calendar actor driven through its handle
