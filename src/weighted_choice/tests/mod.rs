mod distribution;
