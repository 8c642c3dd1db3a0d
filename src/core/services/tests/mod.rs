mod dashboard_service_tests;
